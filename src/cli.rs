use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_API_URL;

#[derive(Parser)]
#[command(name = "ygm")]
#[command(version)]
#[command(about = "You've Got Marketing CLI")]
#[command(
    long_about = "ygm is a command-line interface for You've Got Marketing.\n\n\
                  It provides access to your brand DNA, marketing tasks, and context\n\
                  for use with AI coding assistants."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand, handed explicitly to each handler.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Organization to use (overrides project link and default)
    #[arg(long, global = true, env = "YGM_ORG")]
    pub org: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the version number
    Version,

    /// Authenticate with You've Got Marketing
    ///
    /// Opens your browser where you can enter a code and authorize the CLI.
    /// Once authorized, the token is saved locally for future use.
    Login {
        /// API URL (for development)
        #[arg(long, env = "YGM_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Name for this token (e.g. 'MacBook CLI'); defaults to "<hostname> <date>"
        #[arg(long)]
        name: Option<String>,

        /// Print the verification URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Remove stored credentials for an organization
    Logout {
        /// Organization slug (defaults to the active organization)
        #[arg(value_name = "ORG_SLUG")]
        slug: Option<String>,
    },

    /// Link this project to an organization
    ///
    /// Creates a .ygm.yml file in the current directory naming the
    /// organization to use. It contains no secrets and can be committed.
    Link {
        /// Organization slug to link to
        #[arg(value_name = "ORG_SLUG")]
        slug: Option<String>,
    },

    /// Unlink this project from its organization
    Unlink,

    /// Display your brand DNA
    Brand {
        /// List every brand DNA version instead of the active one
        #[arg(long)]
        versions: bool,
    },

    /// List and manage marketing tasks
    Tasks {
        /// Filter by status (pending, in_progress, completed)
        #[arg(long)]
        status: Option<String>,

        /// Filter by platform (instagram, twitter, linkedin, etc.)
        #[arg(long)]
        platform: Option<String>,

        #[command(subcommand)]
        command: Option<TaskCommands>,
    },

    /// Get full context for AI prompts (always JSON)
    Context,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show a single task with its prompts
    Show {
        id: i64,
    },

    /// Create a new marketing task
    Create {
        /// Task title
        #[arg(long)]
        title: String,

        /// Task description
        #[arg(long)]
        description: Option<String>,

        /// Platform (twitter, instagram, linkedin, reddit, etc.)
        #[arg(long)]
        platform: Option<String>,

        /// Asset type (image, copy, video)
        #[arg(long)]
        asset_type: Option<String>,

        /// Suggested post date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,
    },

    /// Update title, description, or status of a task
    Update {
        id: i64,

        /// New task title
        #[arg(long)]
        title: Option<String>,

        /// New task description
        #[arg(long)]
        description: Option<String>,

        /// New status (pending, in_progress, completed)
        #[arg(long)]
        status: Option<String>,
    },

    /// Discard (soft-delete) a task
    Discard {
        id: i64,
    },
}

fn parse_date(value: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| value.to_string())
        .map_err(|_| format!("expected YYYY-MM-DD, got '{value}'"))
}
