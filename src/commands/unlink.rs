use anyhow::{Context, Result};

use crate::cli::GlobalOpts;
use crate::config::ProjectLink;
use crate::config::project::current_dir;
use crate::{output, skills};

pub fn run(opts: &GlobalOpts) -> Result<()> {
    let cwd = current_dir()?;

    let Some((_, link)) = ProjectLink::load(&cwd).context("Failed to load project link")? else {
        if opts.json {
            return output::print_json(&serde_json::json!({ "removed": null }));
        }
        println!("No local config found. Project is not linked.");
        return Ok(());
    };

    let Some(path) = ProjectLink::remove(&cwd).context("Failed to remove local config")? else {
        return Ok(());
    };

    if let Some(dir) = path.parent() {
        if let Err(e) = skills::remove(dir) {
            tracing::warn!("could not remove local agent skills: {e:#}");
        }
    }

    if opts.json {
        return output::print_json(&serde_json::json!({ "org": link.org, "removed": path }));
    }

    println!("Unlinking from '{}'", link.org);
    println!("Removed {}", path.display());
    Ok(())
}
