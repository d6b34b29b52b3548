//! Fixture directories: group discovery, stale removal, installation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;

use crate::outputs::OutputSet;
use crate::vcs::Vcs;

/// Extension marking an installed file as a golden text fixture.
pub const FIXTURE_EXT: &str = "txt";

/// How installed fixtures leave their source behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallMode {
    /// Leave the source in place; build outputs outlive the run.
    Copy,
    /// Consume the source; extraction scratch files are disposable.
    Move,
}

/// List the proto groups under a fixtures root.
///
/// A group exists if and only if a directory for it already exists; stray
/// files are ignored, and groups that exist only as build outputs are never
/// refreshed. Sorted for a deterministic run order.
pub fn discover_groups(root: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("reading fixtures root {}", root.display()))?;

    let mut groups = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.metadata()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => groups.push(name),
            Err(name) => warn!("skipping fixture directory with non-UTF-8 name {:?}", name),
        }
    }

    groups.sort();
    Ok(groups)
}

/// Clear a group's fixture directory, staging the deletions first.
///
/// The directory is recreated empty so stale fixtures from a removed or
/// renamed generated file cannot survive a refresh.
pub fn remove_stale(vcs: &Vcs, group_dir: &Path) -> Result<()> {
    vcs.rm(&[group_dir.join("...")])?;
    fs::remove_dir_all(group_dir)
        .with_context(|| format!("removing {}", group_dir.display()))?;
    fs::create_dir(group_dir)
        .with_context(|| format!("recreating {}", group_dir.display()))?;
    Ok(())
}

/// Install each output file into the group directory as `<name>.txt`.
///
/// Contents are byte-for-byte copies of the generator output; any nesting in
/// the source paths is flattened away. Returns the destination paths so the
/// caller can stage them for addition in one batch.
pub fn install(outputs: &OutputSet, group_dir: &Path, mode: InstallMode) -> Result<Vec<PathBuf>> {
    let mut installed = Vec::new();

    for source in outputs.files() {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("output file {} has no usable name", source.display()))?;
        let dest = group_dir.join(format!("{}.{}", file_name, FIXTURE_EXT));

        match mode {
            InstallMode::Copy => {
                fs::copy(source, &dest).with_context(|| {
                    format!("copying {} to {}", source.display(), dest.display())
                })?;
            }
            InstallMode::Move => move_file(source, &dest)?,
        }
        installed.push(dest);
    }

    Ok(installed)
}

/// Rename, falling back to copy-and-delete when the scratch directory sits
/// on a different filesystem than the repository.
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }
    fs::copy(source, dest)
        .with_context(|| format!("copying {} to {}", source.display(), dest.display()))?;
    fs::remove_file(source)
        .with_context(|| format!("removing {}", source.display()))?;
    Ok(())
}
