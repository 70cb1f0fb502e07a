//! Command construction and execution.
//!
//! Commands are explicit argument vectors, never shell strings, so
//! credential values cannot be interpreted by a shell. For auditability the
//! equivalent shell command line is rendered for the build log, with secret
//! arguments masked.

mod port;
mod runner;
mod stream;

use std::fmt;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

pub use port::{CommandRunnerPort, RunnerError};
pub use runner::ProcessCommandRunner;
pub use stream::forward_lines;

/// Placeholder shown in logs instead of a secret argument.
pub const MASKED_ARG: &str = "********";

#[derive(Debug)]
enum CommandArg {
    Plain(String),
    Secret(SecretString),
}

impl CommandArg {
    fn exposed(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Secret(secret) => secret.expose_secret(),
        }
    }
}

/// A program plus its arguments.
#[derive(Debug)]
pub struct CommandLine {
    program: String,
    args: Vec<CommandArg>,
    current_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Add a plain argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(CommandArg::Plain(arg.into()));
        self
    }

    /// Add an argument that must never be logged.
    #[must_use]
    pub fn secret_arg(mut self, secret: &SecretString) -> Self {
        self.args.push(CommandArg::Secret(SecretString::from(
            secret.expose_secret().to_string(),
        )));
        self
    }

    /// Run the command from `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Arguments as passed to the process, secrets included.
    pub(crate) fn exposed_args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(CommandArg::exposed)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            let rendered = match arg {
                CommandArg::Plain(value) => shell_quote(value),
                CommandArg::Secret(_) => format!("\"{MASKED_ARG}\""),
            };
            write!(f, " {rendered}")?;
        }
        Ok(())
    }
}

/// Quote `value` for display if a shell would split or expand it.
fn shell_quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '"' | '\'' | '\\' | '$' | '`' | '&' | '|' | ';' | '<' | '>' | '*' | '?' | '(' | ')'
                )
        });
    if !needs_quotes {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
