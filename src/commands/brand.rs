use anyhow::{Context, Result};

use crate::cli::GlobalOpts;
use crate::commands::session;
use crate::output;

pub async fn run(opts: &GlobalOpts, versions: bool) -> Result<()> {
    let session = session(opts)?;

    if versions {
        let versions = session
            .client
            .list_brand_versions()
            .await
            .context("Failed to fetch brand versions")?;

        if opts.json {
            return output::print_json(&serde_json::json!({ "versions": versions }));
        }
        if versions.is_empty() {
            println!("No brand DNA versions found.");
            return Ok(());
        }
        output::print_brand_versions(&versions);
        return Ok(());
    }

    let brand = session
        .client
        .get_brand()
        .await
        .context("Failed to fetch brand")?;

    match brand {
        Some(brand) if opts.json => output::print_json(&brand),
        Some(brand) => {
            output::print_brand(&brand);
            Ok(())
        }
        None if opts.json => output::print_json(&serde_json::Value::Null),
        None => {
            println!("No active brand DNA found.");
            println!("Visit the web app to set up your brand.");
            Ok(())
        }
    }
}
