//! External tools: `PATH` lookup and blocking subprocess execution.

use std::env;
use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use authgraph_core::errors::StageError;

/// Find an executable regular file called `name` on `PATH`.
///
/// A name containing a path separator is checked as given.
pub fn which(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    which_in(name, &path_var)
}

/// [`which`] against an explicit search path.
pub fn which_in(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        let candidate = PathBuf::from(name);
        return is_executable(&candidate).then_some(candidate);
    }
    env::split_paths(search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// A subprocess invocation, optionally with stdout redirected to a file.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    stdout: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Write the child's stdout to `path` (truncating it).
    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    /// Shell-like rendering for logs and errors.
    pub fn render(&self) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        if let Some(stdout) = &self.stdout {
            rendered.push_str(" > ");
            rendered.push_str(&stdout.display().to_string());
        }
        rendered
    }

    /// Run to completion. No timeout; a non-zero exit is an error
    /// carrying the rendered command and exit code.
    pub fn run(&self) -> Result<(), StageError> {
        let rendered = self.render();
        tracing::info!(command = %rendered, "running external command");

        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::null());
        if let Some(path) = &self.stdout {
            let file = File::create(path).map_err(|e| StageError::io(path, e))?;
            command.stdout(Stdio::from(file));
        }

        let status = command.status().map_err(|source| StageError::Spawn {
            command: rendered.clone(),
            source,
        })?;
        if !status.success() {
            return Err(StageError::CommandFailed {
                command: rendered,
                code: status.code(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_redirect() {
        let command = ExternalCommand::new("gunzip")
            .arg("-c")
            .arg("dump.rdf.gz")
            .stdout_to("out.rdf");
        assert_eq!(command.render(), "gunzip -c dump.rdf.gz > out.rdf");
    }

    #[test]
    fn test_which_empty_name() {
        assert_eq!(which(""), None);
    }
}
