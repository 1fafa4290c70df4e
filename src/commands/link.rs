use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::account::ResolveError;
use crate::cli::GlobalOpts;
use crate::config::project::{LINK_FILE, current_dir};
use crate::config::{GlobalConfig, ProjectLink};
use crate::{output, skills};

pub fn run(opts: &GlobalOpts, slug: Option<&str>) -> Result<()> {
    let config = GlobalConfig::load()
        .context("Failed to load config")?
        .filter(|c| !c.accounts.is_empty())
        .ok_or(ResolveError::NotLoggedIn)?;

    let slug = match slug.filter(|s| !s.is_empty()) {
        Some(slug) if config.accounts.contains_key(slug) => slug.to_string(),
        Some(slug) => bail!(
            "Organization '{slug}' not found.\n\nAvailable organizations:\n{}",
            available(&config)
        ),
        None if config.accounts.len() == 1 => config
            .accounts
            .keys()
            .next()
            .cloned()
            .ok_or(ResolveError::NotLoggedIn)?,
        None if opts.json => bail!(
            "Several organizations available; pass one explicitly:\n{}",
            available(&config)
        ),
        None => prompt_for_slug(&config)?,
    };

    let cwd = current_dir()?;
    let previous = ProjectLink::load(&cwd).context("Failed to load project link")?;
    if let Some((_, existing)) = &previous {
        if existing.org == slug {
            if opts.json {
                return output::print_json(&serde_json::json!({ "org": slug, "changed": false }));
            }
            println!("Already linked to '{slug}'");
            return Ok(());
        }
        if !opts.json {
            println!("Updating link from '{}' to '{slug}'", existing.org);
        }
    }

    let path = ProjectLink { org: slug.clone() }
        .save(&cwd)
        .context("Failed to save local config")?;

    if let Err(e) = skills::install(&cwd) {
        tracing::warn!("could not install local agent skills: {e:#}");
    }

    if opts.json {
        return output::print_json(&serde_json::json!({
            "org": slug,
            "changed": true,
            "path": path,
        }));
    }

    let org_name = config
        .accounts
        .get(&slug)
        .map(|a| a.org_name.as_str())
        .unwrap_or_default();
    println!("Linked to '{slug}' ({org_name})");
    println!("Created {LINK_FILE}");
    Ok(())
}

fn available(config: &GlobalConfig) -> String {
    config
        .accounts
        .iter()
        .map(|(slug, account)| format!("  - {slug} ({})", account.org_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn prompt_for_slug(config: &GlobalConfig) -> Result<String> {
    println!("Available organizations:");
    println!();
    for (i, (slug, account)) in config.accounts.iter().enumerate() {
        println!("  {}. {slug} ({})", i + 1, account.org_name);
    }
    println!();
    print!("Enter org slug to link: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read selection")?;
    let input = input.trim();

    if input.is_empty() {
        bail!("no organization selected");
    }
    if !config.accounts.contains_key(input) {
        bail!("organization '{input}' not found");
    }
    Ok(input.to_string())
}
