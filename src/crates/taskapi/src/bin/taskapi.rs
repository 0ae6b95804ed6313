//! taskapi - task tracking backend
//!
//! Main entry point for the taskapi command-line tool and HTTP server.

use clap::{Parser, Subcommand};
use taskapi::cli::{self, task};
use taskapi::ConfigLoader;

#[derive(Parser)]
#[command(name = "taskapi")]
#[command(about = "Task tracking backend with a JSON HTTP API", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config file and database
    Init {
        /// Insert sample tasks when the database is empty
        #[arg(long)]
        seed: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Keep tasks in memory instead of the database
        #[arg(long)]
        in_memory: bool,
    },

    /// Check system health
    Health {
        /// Output format: text (default), json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Task management commands
    #[command(subcommand)]
    Task(TaskCommands),
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority: low, medium (default), high, critical
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// List all tasks, newest first
    List,
    /// Show task details
    Show {
        /// Task ID or its first characters
        id: String,
    },
    /// Update fields of a task
    Update {
        /// Task ID or its first characters
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New priority: low, medium, high, critical
        #[arg(short, long)]
        priority: Option<String>,
        /// New status: pending, in_progress, completed, cancelled
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID or its first characters
        id: String,
    },
    /// Show task statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loader = ConfigLoader::new();

    let config = loader.load().await?;
    taskapi::logging::init(&config.logging);

    match cli.command {
        Commands::Init { seed } => cli::handle_init(&loader, seed).await?,
        Commands::Serve {
            host,
            port,
            in_memory,
        } => cli::handle_serve(config, host, port, in_memory).await?,
        Commands::Health { format } => cli::handle_health(config, &format).await?,
        Commands::Task(command) => {
            let ctx = cli::open_context(config).await?;
            let service = ctx.service();

            let result = match command {
                TaskCommands::Create {
                    title,
                    description,
                    priority,
                } => task::handle_create(service, title, description, priority).await,
                TaskCommands::List => task::handle_list(service).await,
                TaskCommands::Show { id } => task::handle_show(service, id).await,
                TaskCommands::Update {
                    id,
                    title,
                    description,
                    priority,
                    status,
                } => match task::parse_changes(title, description, priority, status) {
                    Ok(changes) => task::handle_update(service, id, changes).await,
                    Err(e) => Err(e),
                },
                TaskCommands::Delete { id } => task::handle_delete(service, id).await,
                TaskCommands::Stats => task::handle_stats(service).await,
            };

            ctx.close().await;
            result?;
        }
    }

    Ok(())
}
