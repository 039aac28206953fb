//! External command execution.
//!
//! A small builder over `std::process::Command` that fails on a non-zero
//! exit status and puts the tool's stderr in the error.
//!
//! ```ignore
//! Cmd::new(&tools.magick)
//!     .args(["input.png", "-negate", "output.png"])
//!     .run()?;
//! ```

use anyhow::{Context, Result};
use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
    process::{Command, Output},
};
use tracing::debug;

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
}

impl Cmd {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command, failing on a non-zero exit status.
    pub fn run(self) -> Result<Output> {
        let name = self.program_name();
        debug!("{} {:?}", name, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Command `{name}` failed ({}):\n{}", output.status, stderr.trim());
        }

        Ok(output)
    }

    /// Execute and return trimmed stdout.
    pub fn run_stdout(self) -> Result<String> {
        let output = self.run()?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// The two external tools the tracer shells out to
#[derive(Debug, Clone)]
pub struct Tools {
    /// ImageMagick 7 `magick`
    pub magick: PathBuf,
    pub potrace: PathBuf,
}

impl Tools {
    /// Resolve both tools on `PATH` before any work starts
    pub fn locate() -> Result<Self> {
        let magick = which::which("magick")
            .context("`magick` (ImageMagick 7) not found on PATH")?;
        let potrace = which::which("potrace").context("`potrace` not found on PATH")?;
        Ok(Self { magick, potrace })
    }
}
