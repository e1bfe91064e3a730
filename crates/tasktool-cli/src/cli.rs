//! Command-line definition.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};

use tasktool_core::TaskId;

use crate::error::CliError;

/// Default task service endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8081";

/// tasktool - task service management tool
#[derive(Parser, Debug)]
#[command(name = "tasktool")]
#[command(about = "A CLI tool for task management", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// HTTP endpoint of the task service
    #[arg(long, global = true, env = "TASK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Access key used to sign in (optional)
    #[arg(
        long = "access_key",
        global = true,
        env = "TASK_ACCESS_KEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub access_key: String,

    /// Secret key used to sign in (optional)
    #[arg(
        long = "secret_key",
        global = true,
        env = "TASK_SECRET_KEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub secret_key: String,

    /// INSECURE, ignore unknown X509 authority
    #[arg(
        long = "insecure_ignore_tls",
        global = true,
        env = "TASK_INSECURE_IGNORE_TLS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub insecure_ignore_tls: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "TASK_TIMEOUT_SECS", default_value_t = 600)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information
    Version,

    /// List tasks
    List(SelectorArgs),

    /// Add tasks
    Add(AddArgs),

    /// Delete tasks
    Delete(SelectorArgs),
}

/// Which tasks a command applies to. Exactly one must be given.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectorArgs {
    /// A single task by ID
    #[arg(short = 't', long = "task_id")]
    pub task_id: Option<String>,

    /// All tasks of an object type
    #[arg(short = 'o', long = "object_type")]
    pub object_type: Option<String>,

    /// All tasks
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Resolved task selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    ById(TaskId),
    ByObjectType(String),
    All,
}

impl SelectorArgs {
    /// Resolve to a single selector.
    pub fn resolve(&self) -> Result<Selector, CliError> {
        let task_id = self.task_id.as_deref().filter(|s| !s.is_empty());
        let object_type = self.object_type.as_deref().filter(|s| !s.is_empty());

        match (task_id, object_type, self.all) {
            (Some(id), None, false) => Ok(Selector::ById(TaskId::from(id))),
            (None, Some(object_type), false) => Ok(Selector::ByObjectType(object_type.to_string())),
            (None, None, true) => Ok(Selector::All),
            _ => Err(CliError::Usage(
                "specify exactly one of --task_id (-t), --object_type (-o) or --all (-a)".into(),
            )),
        }
    }
}

/// Arguments of `add`.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Number of tasks to create (required)
    #[arg(short = 'n', long, default_value_t = 0)]
    pub num: u32,

    /// Object type of the new tasks (required)
    #[arg(short = 'o', long = "object_type", default_value = "")]
    pub object_type: String,

    /// RTSP source the tasks consume (required)
    #[arg(short = 'r', long, default_value = "")]
    pub rtsp: String,

    /// Object storage key for task output (optional)
    #[arg(short = 'm', long = "minio_key")]
    pub minio_key: Option<String>,
}

impl AddArgs {
    /// Check that the required flags are present.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.num == 0 || self.object_type.is_empty() || self.rtsp.is_empty() {
            return Err(CliError::Usage(
                "--num, --object_type and --rtsp are required".into(),
            ));
        }
        Ok(())
    }
}
