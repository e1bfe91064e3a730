//! Grouped task report.
//!
//! A [`Report`] is derived from a task listing on every invocation: tasks are
//! bucketed by object type, optionally narrowed to a single type, and
//! rendered as one block per type. Groups are ordered by object type so the
//! rendered output is stable for a given input.

use std::collections::BTreeMap;
use std::fmt;

use crate::{CoreError, Task, TaskId};

const SEPARATOR_WIDTH: usize = 75;
const UNTYPED_LABEL: &str = "<none>";

/// Projection of a task shown as one line of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub task_id: TaskId,
    pub status: String,
    pub source_address: String,
}

impl From<&Task> for ReportRow {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.info.task_id.clone(),
            status: task.status.status.clone(),
            source_address: task.info.source_address.clone(),
        }
    }
}

/// All tasks of one object type, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub object_type: String,
    pub rows: Vec<ReportRow>,
}

impl ReportGroup {
    /// Number of tasks in the group.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    fn label(&self) -> &str {
        if self.object_type.is_empty() {
            UNTYPED_LABEL
        } else {
            &self.object_type
        }
    }
}

/// Tasks grouped by object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    total: usize,
    groups: Vec<ReportGroup>,
}

impl Report {
    /// Build a report from a task listing.
    ///
    /// With `filter` set to a non-empty object type only that group is kept;
    /// if no task carries that type the build fails with
    /// [`CoreError::UnknownObjectType`].
    pub fn build(tasks: &[Task], filter: Option<&str>) -> Result<Self, CoreError> {
        let mut buckets: BTreeMap<&str, Vec<ReportRow>> = BTreeMap::new();
        for task in tasks {
            buckets
                .entry(task.object_type())
                .or_default()
                .push(ReportRow::from(task));
        }

        let wanted = filter.filter(|f| !f.is_empty());
        if let Some(object_type) = wanted {
            if !buckets.contains_key(object_type) {
                return Err(CoreError::UnknownObjectType(object_type.to_string()));
            }
        }

        let groups = buckets
            .into_iter()
            .filter(|(object_type, _)| wanted.map_or(true, |w| w == *object_type))
            .map(|(object_type, rows)| ReportGroup {
                object_type: object_type.to_string(),
                rows,
            })
            .collect();

        Ok(Self {
            total: tasks.len(),
            groups,
        })
    }

    /// Number of tasks the report was built from, before filtering.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Groups in object type order.
    pub fn groups(&self) -> &[ReportGroup] {
        &self.groups
    }

    /// Look up the group for an object type.
    pub fn group(&self, object_type: &str) -> Option<&ReportGroup> {
        self.groups.iter().find(|g| g.object_type == object_type)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))?;
            writeln!(f, "{:<39} TotalNum:{}", group.label(), group.count())?;
            write_line(f, "TASK ID", "STATUS", "SOURCE")?;
            for row in &group.rows {
                write_line(f, row.task_id.as_str(), &row.status, &row.source_address)?;
            }
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, id: &str, status: &str, source: &str) -> fmt::Result {
    let line = format!("{:<36}  {:<12}  {}", id, status, source);
    writeln!(f, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        vec![
            Task::new("a-1", "A", "RUNNING").with_source("rtsp://cam/1"),
            Task::new("b-1", "B", "PENDING").with_source("rtsp://cam/2"),
            Task::new("a-2", "A", "FAILED").with_source("rtsp://cam/3"),
        ]
    }

    fn ids(group: &ReportGroup) -> Vec<&str> {
        group.rows.iter().map(|r| r.task_id.as_str()).collect()
    }

    #[test]
    fn test_groups_without_filter() {
        let report = Report::build(&sample(), None).unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.groups().len(), 2);

        let a = report.group("A").unwrap();
        assert_eq!(a.count(), 2);
        assert_eq!(ids(a), vec!["a-1", "a-2"]);

        let b = report.group("B").unwrap();
        assert_eq!(b.count(), 1);
        assert_eq!(ids(b), vec!["b-1"]);
    }

    #[test]
    fn test_groups_sorted_by_object_type() {
        let tasks = vec![
            Task::new("z", "ZETA", "RUNNING"),
            Task::new("m", "MID", "RUNNING"),
            Task::new("a", "ALPHA", "RUNNING"),
        ];
        let report = Report::build(&tasks, None).unwrap();

        let order: Vec<&str> = report.groups().iter().map(|g| g.object_type.as_str()).collect();
        assert_eq!(order, vec!["ALPHA", "MID", "ZETA"]);
    }

    #[test]
    fn test_filter_keeps_single_group() {
        let report = Report::build(&sample(), Some("A")).unwrap();

        assert_eq!(report.groups().len(), 1);
        assert_eq!(report.groups()[0].object_type, "A");
        assert_eq!(report.groups()[0].count(), 2);
        assert!(report.group("B").is_none());
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_unknown_filter_fails() {
        let err = Report::build(&sample(), Some("C")).unwrap_err();
        assert_eq!(err, CoreError::UnknownObjectType("C".to_string()));
    }

    #[test]
    fn test_empty_filter_means_no_filter() {
        let report = Report::build(&sample(), Some("")).unwrap();
        assert_eq!(report.groups().len(), 2);
    }

    #[test]
    fn test_empty_listing() {
        let report = Report::build(&[], None).unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.groups().is_empty());
        assert_eq!(report.to_string(), "");

        assert!(matches!(
            Report::build(&[], Some("A")),
            Err(CoreError::UnknownObjectType(_))
        ));
    }

    #[test]
    fn test_render_filtered_report() {
        let report = Report::build(&sample(), Some("A")).unwrap();

        let expected = format!(
            "{sep}\n\
             A                                       TotalNum:2\n\
             TASK ID                               STATUS        SOURCE\n\
             a-1                                   RUNNING       rtsp://cam/1\n\
             a-2                                   FAILED        rtsp://cam/3\n",
            sep = "-".repeat(75)
        );
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_render_untyped_group_and_missing_source() {
        let tasks = vec![Task::new("x-1", "", "RUNNING")];
        let report = Report::build(&tasks, None).unwrap();
        let rendered = report.to_string();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("<none>"));
        assert!(lines[1].ends_with("TotalNum:1"));
        assert_eq!(lines[3], format!("{:<36}  RUNNING", "x-1"));
    }

    #[test]
    fn test_render_long_object_type_keeps_space_before_count() {
        let long_type = "X".repeat(45);
        let tasks = vec![Task::new("x-1", long_type.as_str(), "RUNNING")];
        let rendered = Report::build(&tasks, None).unwrap().to_string();

        let header = rendered.lines().nth(1).unwrap();
        assert_eq!(header, format!("{} TotalNum:1", long_type));
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = Report::build(&sample(), None).unwrap().to_string();
        let second = Report::build(&sample(), None).unwrap().to_string();
        assert_eq!(first, second);
        assert!(first.find("TotalNum:2").unwrap() < first.find("TotalNum:1").unwrap());
    }
}
