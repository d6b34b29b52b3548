//! Locates the freshly generated build outputs for one proto group.
//!
//! Two layouts exist depending on the fixture family: loose files in a
//! per-group output directory, or a single srcjar archive that has to be
//! extracted to scratch space first. Both resolve to the same shape, an
//! [`OutputSet`] listing the group's generated files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use zip::ZipArchive;

/// Where a family's build outputs land, relative to the repository root.
pub enum OutputLayout {
    /// Loose generated files directly inside `<base>/<group><postfix>/`.
    Directory { base: String, postfix: String },
    /// A zip archive at `<base>/<group><postfix>`; only entries with
    /// `source_ext` count as outputs, wherever they are nested.
    Archive {
        base: String,
        postfix: String,
        source_ext: String,
    },
}

/// One group's freshly generated files.
///
/// For archive layouts the files live in an extraction scratch directory;
/// the guard keeps it alive until installation has moved them out, and
/// whatever remains is cleaned up on drop.
pub struct OutputSet {
    files: Vec<PathBuf>,
    _scratch: Option<TempDir>,
}

impl OutputSet {
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl OutputLayout {
    /// Resolve the output set for `group`.
    ///
    /// A missing output directory or archive surfaces as the underlying I/O
    /// error; the build silently skipping a target is not a state this tool
    /// recovers from.
    pub fn locate(&self, group: &str) -> Result<OutputSet> {
        match self {
            OutputLayout::Directory { base, postfix } => {
                directory_outputs(&Path::new(base).join(format!("{}{}", group, postfix)))
            }
            OutputLayout::Archive {
                base,
                postfix,
                source_ext,
            } => archive_outputs(
                &Path::new(base).join(format!("{}{}", group, postfix)),
                source_ext,
            ),
        }
    }
}

/// List the generated files directly inside a build output directory.
pub fn directory_outputs(dir: &Path) -> Result<OutputSet> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading build output directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        if entry.metadata()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(OutputSet {
        files,
        _scratch: None,
    })
}

/// Extract a packaged build output and collect its generated sources.
///
/// The archive is unpacked into a fresh scratch directory and every file
/// with the given extension anywhere under it becomes part of the output
/// set, regardless of nesting.
pub fn archive_outputs(archive: &Path, source_ext: &str) -> Result<OutputSet> {
    let file = File::open(archive)
        .with_context(|| format!("opening build output archive {}", archive.display()))?;
    let mut zip = ZipArchive::new(file)
        .with_context(|| format!("reading archive {}", archive.display()))?;

    let scratch = TempDir::new().context("creating extraction directory")?;
    zip.extract(scratch.path())
        .with_context(|| format!("extracting {}", archive.display()))?;

    let mut files = Vec::new();
    collect_sources(scratch.path(), source_ext, &mut files)?;
    files.sort();

    Ok(OutputSet {
        files,
        _scratch: Some(scratch),
    })
}

fn collect_sources(dir: &Path, ext: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            collect_sources(&path, ext, files)?;
        } else if metadata.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(ext)
        {
            files.push(path);
        }
    }
    Ok(())
}
