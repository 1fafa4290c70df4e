//! Selects which stored account an authenticated command runs as.
//!
//! Precedence, first non-empty source wins:
//! 1. `--org` override
//! 2. nearest `.ygm.yml` project link
//! 3. `default_org` in the credential store
//! 4. the lexicographically first stored account
//!
//! Once a slug has been chosen by one of the first three sources it must exist
//! in the store; resolution never falls through to a lower-priority source.

use std::fmt;

use thiserror::Error;

use crate::config::{Account, GlobalConfig, ProjectLink};

/// Where a slug came from, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugSource {
    Override,
    ProjectLink,
    DefaultOrg,
    Fallback,
}

impl fmt::Display for SlugSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Override => "--org",
            Self::ProjectLink => "project link",
            Self::DefaultOrg => "default_org",
            Self::Fallback => "first stored account",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("not logged in. Run 'ygm login' first")]
    NotLoggedIn,

    #[error("organization '{slug}' (from {origin}) not found in config. Run 'ygm login' to add it")]
    OrgNotFound { slug: String, origin: SlugSource },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedAccount<'a> {
    pub slug: &'a str,
    pub account: &'a Account,
    pub source: SlugSource,
}

/// Resolve the active account from every ranked source.
pub fn resolve<'a>(
    config: Option<&'a GlobalConfig>,
    org_override: Option<&str>,
    link: Option<&ProjectLink>,
) -> Result<ResolvedAccount<'a>, ResolveError> {
    let config = config
        .filter(|c| !c.accounts.is_empty())
        .ok_or(ResolveError::NotLoggedIn)?;

    let chosen = [
        (org_override, SlugSource::Override),
        (link.map(|l| l.org.as_str()), SlugSource::ProjectLink),
        (config.default_org.as_deref(), SlugSource::DefaultOrg),
    ]
    .into_iter()
    .find_map(|(slug, source)| non_empty(slug).map(|slug| (slug, source)));

    match chosen {
        Some((slug, source)) => {
            let (slug, account) = config.accounts.get_key_value(slug).ok_or_else(|| {
                ResolveError::OrgNotFound {
                    slug: slug.to_string(),
                    origin: source,
                }
            })?;
            Ok(ResolvedAccount {
                slug,
                account,
                source,
            })
        }
        None => {
            let (slug, account) = config
                .accounts
                .iter()
                .next()
                .ok_or(ResolveError::NotLoggedIn)?;
            Ok(ResolvedAccount {
                slug,
                account,
                source: SlugSource::Fallback,
            })
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
