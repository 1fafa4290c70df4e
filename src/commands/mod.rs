pub mod brand;
pub mod context;
pub mod link;
pub mod login;
pub mod logout;
pub mod tasks;
pub mod unlink;

use anyhow::{Context, Result};

use crate::account::{self, ResolveError};
use crate::api::YgmClient;
use crate::cli::GlobalOpts;
use crate::config::project::current_dir;
use crate::config::{GlobalConfig, ProjectLink};

/// An authenticated client for the organization this invocation resolves to.
pub struct Session {
    pub slug: String,
    pub client: YgmClient,
}

/// Resolve the active account from `--org`, the project link and the
/// credential store, and build an API client for it.
pub fn session(opts: &GlobalOpts) -> Result<Session> {
    let Some(config) = GlobalConfig::load().context("Failed to load config")? else {
        return Err(ResolveError::NotLoggedIn.into());
    };

    let cwd = current_dir()?;
    let link = ProjectLink::load(&cwd)
        .context("Failed to load project link")?
        .map(|(_, link)| link);

    let resolved = account::resolve(Some(&config), opts.org.as_deref(), link.as_ref())?;
    tracing::debug!(org = resolved.slug, source = %resolved.source, "resolved account");

    let client = YgmClient::new(&config.api_base_url, &resolved.account.bearer_token)
        .context("Failed to create HTTP client")?;

    Ok(Session {
        slug: resolved.slug.to_string(),
        client,
    })
}
