use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Version-control client used to stage and revert fixture changes.
const VCS_TOOL: &str = "g4";

/// Wrapper over the external version-control client.
///
/// Every operation is a blocking child process; a nonzero exit from the
/// client is fatal for the whole run, so each method surfaces it as an error
/// naming the operation. The program name is a parameter for the same
/// testability reason as [`crate::builder::Builder`].
pub struct Vcs {
    program: String,
}

impl Default for Vcs {
    fn default() -> Self {
        Vcs::new(VCS_TOOL)
    }
}

impl Vcs {
    pub fn new(program: impl Into<String>) -> Self {
        Vcs {
            program: program.into(),
        }
    }

    /// Stage a batch of files for addition.
    pub fn add<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        self.op("add", paths)
    }

    /// Stage a batch of paths for deletion.
    ///
    /// Accepts the client's `...` wildcard suffix, so a whole directory can
    /// be staged as `<dir>/...`.
    pub fn rm<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        self.op("rm", paths)
    }

    /// Discard every staged change whose file content matches the version
    /// already committed, collapsing the delete/add staging to a true diff.
    pub fn revert_unchanged(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("revert")
            .arg("-a")
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;

        if !status.success() {
            bail!("cannot {} revert -a ({})", self.program, status);
        }
        Ok(())
    }

    fn op<P: AsRef<Path>>(&self, op: &str, paths: &[P]) -> Result<()> {
        // The client treats a bare op as malformed; catch it before spawning.
        if paths.is_empty() {
            bail!("{} {} needs at least one path", self.program, op);
        }

        let status = Command::new(&self.program)
            .arg(op)
            .args(paths.iter().map(|p| p.as_ref().as_os_str()))
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;

        if !status.success() {
            bail!("cannot {} {} ({})", self.program, op, status);
        }
        Ok(())
    }
}
