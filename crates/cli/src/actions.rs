//! GitHub Actions runner integration.
//!
//! The runner reads workflow commands (`::name::data`) from the step's stdout
//! and applies `GITHUB_PATH` entries to every later step of the job.

use setup_applanga_core::Result;
use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the file of extra `PATH` entries.
pub const GITHUB_PATH_ENV: &str = "GITHUB_PATH";

/// Side effects a run has on the CI runner.
pub trait Runner {
    /// Prepend `dir` to the executable search path of later steps.
    ///
    /// The current process `PATH` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the path file or the command stream cannot be written.
    fn add_path(&mut self, dir: &Path) -> Result<()>;

    /// Surface a non-fatal warning on the step.
    fn warning(&mut self, message: &str);

    /// Mark the step as failed with `message`.
    fn set_failed(&mut self, message: &str);
}

/// [`Runner`] speaking the GitHub Actions workflow command protocol.
#[derive(Debug)]
pub struct GitHubActions<W: Write> {
    out: W,
    path_file: Option<PathBuf>,
}

impl GitHubActions<Stdout> {
    /// Commands on stdout, path entries in the file named by `GITHUB_PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        let path_file = std::env::var_os(GITHUB_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(io::stdout(), path_file)
    }
}

impl<W: Write> GitHubActions<W> {
    /// Create a runner writing commands to `out`.
    ///
    /// Without a `path_file` the legacy `add-path` command is emitted instead.
    pub fn new(out: W, path_file: Option<PathBuf>) -> Self {
        Self { out, path_file }
    }

    /// The command stream.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn command(&mut self, name: &str, data: &str) {
        // A closed stdout leaves nothing to report to.
        let _ = writeln!(self.out, "::{name}::{}", escape_data(data));
        let _ = self.out.flush();
    }
}

impl<W: Write> Runner for GitHubActions<W> {
    fn add_path(&mut self, dir: &Path) -> Result<()> {
        if let Some(file) = &self.path_file {
            let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
            writeln!(handle, "{}", dir.display())?;
            debug!(?dir, ?file, "Appended to GITHUB_PATH");
        } else {
            writeln!(self.out, "::add-path::{}", escape_data(&dir.display().to_string()))?;
            debug!(?dir, "Emitted add-path command");
        }
        Ok(())
    }

    fn warning(&mut self, message: &str) {
        self.command("warning", message);
    }

    fn set_failed(&mut self, message: &str) {
        self.command("error", message);
    }
}

/// Escape workflow command data.
#[must_use]
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
