#![forbid(unsafe_code)]

//! taskctl: command-line client for the tasklist daemon.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tasklist_client::{HttpTaskApi, TaskCache};
use tasklist_core::{CreateTaskRequest, Task, TaskId, TaskStatus, UpdateTaskRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "taskctl", version, about = "Command-line client for the tasklist daemon")]
struct Args {
    /// Daemon base URL.
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    daemon: String,

    /// Log level (env-filter syntax).
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print every task.
    List,
    /// Create a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// todo, in-progress or done
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Change fields of an existing task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Move a task to another status.
    Status { id: String, status: TaskStatus },
    /// Delete a task.
    Remove { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::new(&args.log))
        .init();

    let mut cache = TaskCache::new(HttpTaskApi::new(args.daemon));

    let ok = match args.cmd {
        Cmd::List => {
            let ok = cache.fetch_all().await;
            if ok {
                print_json(&cache.tasks())?;
            }
            ok
        }
        Cmd::Add {
            title,
            description,
            status,
        } => {
            let req = CreateTaskRequest {
                title: Some(title),
                description,
                status,
            };
            print_task(cache.add(req).await)?
        }
        Cmd::Update {
            id,
            title,
            description,
            status,
        } => {
            cache.fetch_all().await;
            let patch = UpdateTaskRequest {
                title,
                description,
                status,
            };
            print_task(cache.update(&TaskId::from(id), patch).await)?
        }
        Cmd::Status { id, status } => {
            cache.fetch_all().await;
            print_task(cache.update_status(&TaskId::from(id), status).await)?
        }
        Cmd::Remove { id } => print_task(cache.remove(&TaskId::from(id)).await)?,
    };

    if !ok {
        anyhow::bail!("request to {} failed", cache.api().base_url());
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_task(task: Option<Task>) -> anyhow::Result<bool> {
    match task {
        Some(task) => {
            print_json(&task)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
