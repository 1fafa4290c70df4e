use anyhow::{Context, Result};

use crate::cli::GlobalOpts;
use crate::commands::session;
use crate::output;

/// Context is meant for machine consumption, so it is always JSON.
pub async fn run(opts: &GlobalOpts) -> Result<()> {
    let session = session(opts)?;
    let context = session
        .client
        .get_context()
        .await
        .context("Failed to fetch context")?;

    output::print_json(&context)
}
