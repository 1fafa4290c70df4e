use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::auth::device_flow::{default_token_name, open_browser, verification_url};
use crate::auth::{AuthorizationOutcome, DeviceFlow, wait_for_authorization};
use crate::cli::GlobalOpts;
use crate::config::project::current_dir;
use crate::config::{Account, GlobalConfig, ProjectLink};
use crate::output;

#[derive(Serialize)]
struct LoginSummary<'a> {
    organization: &'a str,
    organization_name: &'a str,
    user_email: &'a str,
    config_path: PathBuf,
    linked_directory: Option<PathBuf>,
}

pub async fn run(
    opts: &GlobalOpts,
    api_url: &str,
    token_name: Option<&str>,
    no_browser: bool,
) -> Result<()> {
    let mut config = GlobalConfig::load()
        .context("Failed to load config")?
        .unwrap_or_default();
    config.api_base_url = api_url.trim_end_matches('/').to_string();

    // Instructions go to stderr when stdout is reserved for JSON.
    let mut out: Box<dyn Write> = if opts.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    writeln!(out, "Starting device flow authentication...")?;
    writeln!(out)?;

    let flow = Arc::new(DeviceFlow::new(&config.api_base_url)?);
    let authorization = flow
        .request_device_code()
        .await
        .context("Failed to start authentication")?;

    let code_url = verification_url(&authorization.verification_uri, &authorization.user_code);

    writeln!(out, "Your code: {}", authorization.user_code)?;
    writeln!(out)?;

    if no_browser {
        writeln!(out, "Please visit: {code_url}")?;
    } else {
        writeln!(
            out,
            "Opening {} in your browser...",
            authorization.verification_uri
        )?;
        if let Err(e) = open_browser(&code_url) {
            tracing::warn!("could not open browser automatically: {e}");
            writeln!(out, "Please visit: {code_url}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Waiting for authorization...")?;
    out.flush()?;

    let token_name = token_name
        .filter(|n| !n.is_empty())
        .map_or_else(default_token_name, str::to_string);

    let grant = match wait_for_authorization(flow, &authorization, Some(token_name)).await {
        AuthorizationOutcome::Granted(grant) => grant,
        AuthorizationOutcome::Denied => bail!("Authentication failed: authorization denied by user"),
        AuthorizationOutcome::Expired => bail!("Authentication failed: device code expired"),
        AuthorizationOutcome::TimedOut => bail!("Authentication timed out - please try again"),
        AuthorizationOutcome::TransportError(diagnostic) => {
            bail!("Authentication failed: {diagnostic}")
        }
    };

    let slug = grant.organization.slug.as_str();
    config.add_account(
        slug,
        Account {
            bearer_token: grant.access_token.clone(),
            user_email: grant.user.email.clone(),
            org_id: grant.organization.id,
            org_name: grant.organization.name.clone(),
        },
    );
    let config_path = config.save().context("Failed to save config")?;

    // Linking is a convenience; the login itself already succeeded.
    let link = ProjectLink {
        org: slug.to_string(),
    };
    let linked_directory = match current_dir().and_then(|cwd| link.save(&cwd).map(|_| cwd)) {
        Ok(cwd) => Some(cwd),
        Err(e) => {
            tracing::warn!("could not link current directory: {e}");
            None
        }
    };

    let summary = LoginSummary {
        organization: slug,
        organization_name: &grant.organization.name,
        user_email: &grant.user.email,
        config_path,
        linked_directory,
    };

    if opts.json {
        return output::print_json(&summary);
    }

    print_ready(&summary);
    Ok(())
}

fn print_ready(summary: &LoginSummary<'_>) {
    println!();
    println!("=== YGM CLI Ready ===");
    println!();
    println!(
        "Authenticated as: {} ({})",
        summary.user_email, summary.organization_name
    );
    println!("Organization slug: {}", summary.organization);
    if let Some(dir) = &summary.linked_directory {
        println!("Linked directory: {}", dir.display());
    }
    println!();
    println!("Available commands:");
    println!();
    println!("  ygm brand --json    Get brand DNA (colors, fonts, voice guidelines)");
    println!("  ygm tasks --json    Get pending marketing tasks with prompts");
    println!("  ygm context         Get full context dump (brand + plan + tasks)");
    println!();
    println!("For AI assistants: Run 'ygm context' to get complete marketing context");
    println!("including brand voice, visual guidelines, and actionable tasks.");
    println!();
    println!("Configuration:");
    println!("  Global config: {} (auth tokens)", summary.config_path.display());
    println!(
        "  Local config:  .ygm.yml (project org: {})",
        summary.organization
    );
    println!();
    println!("To link a different project: cd /path/to/project && ygm link");
}
