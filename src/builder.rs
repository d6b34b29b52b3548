use std::process::Command;

use anyhow::{Context, Result, bail};

/// Build tool that compiles the proto targets.
const BUILD_TOOL: &str = "blaze";

/// Thin wrapper over the external build tool.
///
/// The program name is a parameter so tests can substitute a stand-in
/// executable; real runs use [`Builder::default`].
pub struct Builder {
    program: String,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new(BUILD_TOOL)
    }
}

impl Builder {
    pub fn new(program: impl Into<String>) -> Self {
        Builder {
            program: program.into(),
        }
    }

    /// Run `<tool> build [flags] <target>`, blocking until it exits.
    ///
    /// Output goes straight to the user's terminal. A nonzero exit status is
    /// an error; no fixtures may be touched before every build has succeeded.
    pub fn build(&self, flags: &[&str], target: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("build")
            .args(flags)
            .arg(target)
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;

        if !status.success() {
            bail!("{} build of {} failed ({})", self.program, target, status);
        }
        Ok(())
    }
}
