//! Hand-off from the resolver to the server process
//!
//! On Unix the resolver replaces its own process image, so the server
//! inherits the PID, environment, working directory and signals. Elsewhere
//! the server runs as a child and its exit code is propagated.

use crate::error::ResolveError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Environment variable carrying the server's listen port
pub const PORT_ENV: &str = "PORT";

/// Where the reported port came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSource {
    Environment,
    Default,
}

/// Port the server will see: the inherited `PORT`, or `default_port` when unset or blank
pub fn effective_port(env_port: Option<String>, default_port: u16) -> (String, PortSource) {
    match env_port {
        Some(port) if !port.trim().is_empty() => (port, PortSource::Environment),
        _ => (default_port.to_string(), PortSource::Default),
    }
}

/// Fully decided command line for the server
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    interpreter: Option<String>,
    script: PathBuf,
    args: Vec<OsString>,
    port: String,
    port_source: PortSource,
}

impl LaunchPlan {
    /// Build a plan from the resolved script.
    ///
    /// `env_port` is the current value of `PORT`, if any. When it is absent
    /// the server is started with `PORT=<default_port>`.
    pub fn new(
        script: impl Into<PathBuf>,
        interpreter: Option<String>,
        args: Vec<OsString>,
        env_port: Option<String>,
        default_port: u16,
    ) -> Self {
        let (port, port_source) = effective_port(env_port, default_port);
        Self {
            interpreter: interpreter.filter(|i| !i.trim().is_empty()),
            script: script.into(),
            args,
            port,
            port_source,
        }
    }

    /// Same as [`LaunchPlan::new`], reading `PORT` from the process environment
    pub fn from_env(
        script: impl Into<PathBuf>,
        interpreter: Option<String>,
        args: Vec<OsString>,
        default_port: u16,
    ) -> Self {
        Self::new(
            script,
            interpreter,
            args,
            std::env::var(PORT_ENV).ok(),
            default_port,
        )
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn port_source(&self) -> PortSource {
        self.port_source
    }

    /// Program that will occupy the process: the interpreter, or the script itself
    pub fn program(&self) -> PathBuf {
        match &self.interpreter {
            Some(interpreter) => PathBuf::from(interpreter),
            None => self.script.clone(),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.program());
        if self.interpreter.is_some() {
            cmd.arg(&self.script);
        }
        cmd.args(&self.args);
        if self.port_source == PortSource::Default {
            cmd.env(PORT_ENV, &self.port);
        }
        cmd
    }

    /// Replace the current process with the server.
    ///
    /// Only returns if `exec` itself failed.
    #[cfg(unix)]
    pub fn launch(&self) -> Result<i32, ResolveError> {
        use std::os::unix::process::CommandExt;

        info!(
            program = %self.program().display(),
            script = %self.script.display(),
            port = %self.port,
            "exec server"
        );
        let source = self.command().exec();
        Err(ResolveError::Launch {
            program: self.program(),
            source,
        })
    }

    /// Run the server as a child and return its exit code
    #[cfg(not(unix))]
    pub fn launch(&self) -> Result<i32, ResolveError> {
        info!(
            program = %self.program().display(),
            script = %self.script.display(),
            port = %self.port,
            "spawning server"
        );
        let status = self
            .command()
            .status()
            .map_err(|source| ResolveError::Launch {
                program: self.program(),
                source,
            })?;
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn env_of(cmd: &Command, key: &str) -> Option<Option<OsString>> {
        cmd.get_envs()
            .find(|(k, _)| *k == OsStr::new(key))
            .map(|(_, v)| v.map(OsStr::to_os_string))
    }

    #[test]
    fn interpreter_receives_script_then_args() {
        let plan = LaunchPlan::new(
            "/app/run_server.py",
            Some("python3".to_string()),
            vec!["grpc".into(), "0.0.0.0".into()],
            Some("9000".to_string()),
            8080,
        );
        let cmd = plan.command();

        assert_eq!(cmd.get_program(), "python3");
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(args, vec!["/app/run_server.py", "grpc", "0.0.0.0"]);
    }

    #[test]
    fn script_runs_directly_without_interpreter() {
        let plan = LaunchPlan::new("/app/run_server.py", None, vec![], None, 8080);
        let cmd = plan.command();

        assert_eq!(cmd.get_program(), "/app/run_server.py");
        assert_eq!(cmd.get_args().count(), 0);
    }

    #[test]
    fn blank_interpreter_means_direct_exec() {
        let plan = LaunchPlan::new("/app/run_server.py", Some("  ".into()), vec![], None, 8080);
        assert_eq!(plan.program(), PathBuf::from("/app/run_server.py"));
    }

    #[test]
    fn unset_port_defaults_to_8080_for_the_child() {
        let plan = LaunchPlan::new("/app/run_server.py", None, vec![], None, 8080);

        assert_eq!(plan.port(), "8080");
        assert_eq!(plan.port_source(), PortSource::Default);
        assert_eq!(
            env_of(&plan.command(), PORT_ENV),
            Some(Some(OsString::from("8080")))
        );
    }

    #[test]
    fn inherited_port_is_left_untouched() {
        let plan = LaunchPlan::new("/app/run_server.py", None, vec![], Some("50051".into()), 8080);

        assert_eq!(plan.port(), "50051");
        assert_eq!(plan.port_source(), PortSource::Environment);
        assert_eq!(env_of(&plan.command(), PORT_ENV), None);
    }

    #[test]
    fn empty_port_counts_as_unset() {
        let plan = LaunchPlan::new("/app/run_server.py", None, vec![], Some(String::new()), 8080);
        assert_eq!(plan.port_source(), PortSource::Default);
    }
}
