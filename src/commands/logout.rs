use anyhow::{Context, Result, bail};

use crate::account::{self, ResolveError};
use crate::cli::GlobalOpts;
use crate::config::project::current_dir;
use crate::config::{GlobalConfig, ProjectLink};
use crate::output;

/// Forget the credentials for one organization. Project links are left alone.
pub fn run(opts: &GlobalOpts, slug: Option<&str>) -> Result<()> {
    let mut config = GlobalConfig::load()
        .context("Failed to load config")?
        .filter(|c| !c.accounts.is_empty())
        .ok_or(ResolveError::NotLoggedIn)?;

    let slug = match slug.filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => {
            let cwd = current_dir()?;
            let link = ProjectLink::load(&cwd)
                .context("Failed to load project link")?
                .map(|(_, link)| link);
            account::resolve(Some(&config), opts.org.as_deref(), link.as_ref())?
                .slug
                .to_string()
        }
    };

    let Some(removed) = config.remove_account(&slug) else {
        bail!("Organization '{slug}' not found in config");
    };
    config.save().context("Failed to save config")?;

    if opts.json {
        return output::print_json(&serde_json::json!({
            "org": slug,
            "default_org": config.default_org,
        }));
    }

    println!("Logged out of '{slug}' ({})", removed.org_name);
    match &config.default_org {
        Some(default) => println!("Default organization: {default}"),
        None if config.accounts.is_empty() => {
            println!("No accounts remain. Run 'ygm login' to sign in.");
        }
        None => {}
    }
    Ok(())
}
