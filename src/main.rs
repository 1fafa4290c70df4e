mod account;
mod api;
mod auth;
mod cli;
mod commands;
mod config;
mod models;
mod output;
mod skills;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, GlobalOpts, TaskCommands};
use tracing_subscriber::EnvFilter;

use crate::models::task::{CreateTaskRequest, UpdateTaskRequest};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("YGM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    let json = cli.global.json;

    if let Err(e) = run(cli.global, cli.command).await {
        if json {
            let _ = output::print_json(&serde_json::json!({ "error": format!("{e:#}") }));
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(opts: GlobalOpts, command: Commands) -> Result<()> {
    match command {
        Commands::Version => {
            println!("ygm version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Login {
            api_url,
            name,
            no_browser,
        } => commands::login::run(&opts, &api_url, name.as_deref(), no_browser).await,
        Commands::Logout { slug } => commands::logout::run(&opts, slug.as_deref()),
        Commands::Link { slug } => commands::link::run(&opts, slug.as_deref()),
        Commands::Unlink => commands::unlink::run(&opts),
        Commands::Brand { versions } => commands::brand::run(&opts, versions).await,
        Commands::Context => commands::context::run(&opts).await,
        Commands::Tasks {
            status,
            platform,
            command,
        } => match command {
            None => commands::tasks::list(&opts, status.as_deref(), platform.as_deref()).await,
            Some(TaskCommands::Show { id }) => commands::tasks::show(&opts, id).await,
            Some(TaskCommands::Create {
                title,
                description,
                platform,
                asset_type,
                date,
            }) => {
                let req = CreateTaskRequest {
                    title,
                    description,
                    platform,
                    asset_type,
                    suggested_post_date: date,
                };
                commands::tasks::create(&opts, req).await
            }
            Some(TaskCommands::Update {
                id,
                title,
                description,
                status,
            }) => {
                let req = UpdateTaskRequest {
                    title,
                    description,
                    status,
                };
                commands::tasks::update(&opts, id, req).await
            }
            Some(TaskCommands::Discard { id }) => commands::tasks::discard(&opts, id).await,
        },
    }
}
