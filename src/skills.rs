//! Installs the agent skill that tells AI coding assistants how to use `ygm`.
//!
//! The skill is written once under `.agents/skills/` and symlinked into the
//! directories other assistants scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const SKILL_NAME: &str = "youve-got-marketing";
const SKILL_CONTENT: &str = include_str!("../assets/SKILL.md");

/// Canonical skill directory plus the symlinks pointing at it.
fn skill_paths(base: &Path) -> (PathBuf, [PathBuf; 2]) {
    let canonical = base.join(".agents").join("skills").join(SKILL_NAME);
    let links = [
        base.join(".github").join("skills").join(SKILL_NAME),
        base.join(".claude").join("skills").join(SKILL_NAME),
    ];
    (canonical, links)
}

/// Write `SKILL.md` under `base` and link it for each assistant. A link that
/// cannot be created is reported as a warning, not an error.
pub fn install(base: &Path) -> Result<()> {
    let (canonical, links) = skill_paths(base);

    fs::create_dir_all(&canonical)
        .with_context(|| format!("Failed to create {}", canonical.display()))?;
    fs::write(canonical.join("SKILL.md"), SKILL_CONTENT).context("Failed to write skill")?;

    for link in &links {
        if let Err(e) = ensure_symlink(&canonical, link) {
            tracing::warn!("could not create symlink {}: {e}", link.display());
        }
    }

    Ok(())
}

/// Remove the skill from `base`. Only symlinks are deleted from the assistant
/// directories; anything else found there is left alone.
pub fn remove(base: &Path) -> Result<()> {
    let (canonical, links) = skill_paths(base);

    for link in &links {
        let Ok(meta) = fs::symlink_metadata(link) else {
            continue;
        };
        if !meta.file_type().is_symlink() {
            tracing::warn!("{} is not a symlink, skipping removal", link.display());
            continue;
        }
        if let Err(e) = fs::remove_file(link) {
            tracing::warn!("could not remove symlink {}: {e}", link.display());
        }
    }

    match fs::remove_dir_all(&canonical) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove local skill"),
    }
}

/// Point `link` at `target`. Replaces a symlink that points elsewhere; refuses
/// to touch a real file or directory.
fn ensure_symlink(target: &Path, link: &Path) -> io::Result<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::symlink_metadata(link) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return symlink_dir(target, link),
        Err(e) => return Err(e),
        Ok(meta) if !meta.file_type().is_symlink() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists and is not a symlink", link.display()),
            ));
        }
        Ok(_) => {}
    }

    if fs::read_link(link).is_ok_and(|existing| existing == target) {
        return Ok(());
    }

    fs::remove_file(link)?;
    symlink_dir(target, link)
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn install_writes_skill_and_links() {
        let base = tempfile::tempdir().unwrap();
        install(base.path()).unwrap();

        let (canonical, links) = skill_paths(base.path());
        let written = fs::read_to_string(canonical.join("SKILL.md")).unwrap();
        assert!(written.contains("ygm context"));

        for link in &links {
            assert_eq!(fs::read_link(link).unwrap(), canonical);
            assert!(link.join("SKILL.md").is_file());
        }

        // Second install is a no-op.
        install(base.path()).unwrap();
    }

    #[test]
    fn stale_symlink_is_replaced() {
        let base = tempfile::tempdir().unwrap();
        let (canonical, links) = skill_paths(base.path());
        let elsewhere = base.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        fs::create_dir_all(links[0].parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&elsewhere, &links[0]).unwrap();

        install(base.path()).unwrap();

        assert_eq!(fs::read_link(&links[0]).unwrap(), canonical);
    }

    #[test]
    fn real_directory_is_left_alone() {
        let base = tempfile::tempdir().unwrap();
        let (_, links) = skill_paths(base.path());
        fs::create_dir_all(&links[1]).unwrap();
        fs::write(links[1].join("mine.txt"), "keep").unwrap();

        install(base.path()).unwrap();
        assert!(links[1].join("mine.txt").is_file());

        remove(base.path()).unwrap();
        assert!(links[1].join("mine.txt").is_file());
        assert!(fs::symlink_metadata(&links[0]).is_err());
    }
}
