//! Command handlers.
//!
//! Handlers write their results to the given writer and return errors to
//! `main`, which owns the process exit.

use std::io::Write;

use tasktool_client::{AddTasksRequest, TaskServiceClient};
use tasktool_core::{Report, TaskId};
use tracing::info;

use crate::cli::{AddArgs, Commands, Selector, SelectorArgs};
use crate::config::Config;
use crate::error::CliError;

/// Run a parsed command.
pub async fn run<W: Write>(config: &Config, command: Commands, out: &mut W) -> Result<(), CliError> {
    match command {
        Commands::Version => version(out),
        Commands::List(selector) => list(config, &selector, out).await,
        Commands::Add(args) => add(config, &args).await,
        Commands::Delete(selector) => delete(config, &selector).await,
    }
}

fn version<W: Write>(out: &mut W) -> Result<(), CliError> {
    writeln!(out, "{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
    writeln!(
        out,
        "  platform: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    )?;
    Ok(())
}

async fn list<W: Write>(
    config: &Config,
    selector: &SelectorArgs,
    out: &mut W,
) -> Result<(), CliError> {
    let selector = selector.resolve()?;
    let client = config.connect()?;

    match selector {
        Selector::ById(task_id) => show_task(&client, &task_id, out).await,
        Selector::ByObjectType(object_type) => print_report(&client, Some(&object_type), out).await,
        Selector::All => print_report(&client, None, out).await,
    }
}

async fn show_task<W: Write>(
    client: &TaskServiceClient,
    task_id: &TaskId,
    out: &mut W,
) -> Result<(), CliError> {
    let body = client.get_task(task_id).await?;
    writeln!(out, "{}", body)?;
    Ok(())
}

async fn print_report<W: Write>(
    client: &TaskServiceClient,
    object_type: Option<&str>,
    out: &mut W,
) -> Result<(), CliError> {
    let resp = client.list_all_tasks().await?;
    info!("Total tasks: {}", resp.tasks.len());

    let report = Report::build(&resp.tasks, object_type)?;
    write!(out, "{}", report)?;
    Ok(())
}

async fn add(config: &Config, args: &AddArgs) -> Result<(), CliError> {
    args.validate()?;
    let client = config.connect()?;

    let request = AddTasksRequest::new(
        args.num,
        args.object_type.as_str(),
        args.rtsp.as_str(),
        args.minio_key.clone(),
    );
    client.add_tasks(&request).await?;
    info!(num = args.num, object_type = %args.object_type, "Tasks added");
    Ok(())
}

async fn delete(config: &Config, selector: &SelectorArgs) -> Result<(), CliError> {
    let selector = selector.resolve()?;
    let client = config.connect()?;

    match &selector {
        Selector::ById(task_id) => client.delete_task_by_id(task_id).await?,
        Selector::ByObjectType(object_type) => {
            client.delete_tasks_by_object_type(object_type).await?
        }
        Selector::All => client.delete_all_tasks().await?,
    }
    info!(selector = ?selector, "Tasks deleted");
    Ok(())
}
