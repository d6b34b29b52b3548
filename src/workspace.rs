use std::env;
use std::path::Path;

use anyhow::{Result, bail};

/// Directory name the repository root is expected to end with.
const REPO_ROOT_MARKER: &str = "google3";

/// Verify the process was launched from the repository root.
///
/// Everything downstream addresses build outputs and fixture directories by
/// relative path, so a wrong working directory is a configuration error and
/// the run must abort before any side effect.
pub fn ensure_repo_root() -> Result<()> {
    let cwd = env::current_dir()?;
    check_repo_root(&cwd)
}

fn check_repo_root(cwd: &Path) -> Result<()> {
    let at_root = cwd
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == REPO_ROOT_MARKER);

    if !at_root {
        bail!(
            "run this from a `{}` repository root, not {}",
            REPO_ROOT_MARKER,
            cwd.display()
        );
    }
    Ok(())
}
