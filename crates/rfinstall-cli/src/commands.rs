//! Subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download or extract the installer, run it, and log in when credentials are available
    Install(InstallArgs),

    /// Log the installed CLI in without reinstalling
    Login(CredentialArgs),

    /// Check that the host tools the installer needs are on PATH
    CheckDeps,
}

/// Arguments for `rfinstall install`.
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Build workspace the installer script is written to
    #[arg(short, long, env = "WORKSPACE")]
    pub workspace: PathBuf,

    /// Download the installer script from this URL
    #[arg(long, conflicts_with = "embedded")]
    pub url: Option<String>,

    /// Use the installer script bundled into this binary
    #[arg(long)]
    pub embedded: bool,

    /// Fail when no credentials can be resolved
    #[arg(long)]
    pub require_login: bool,

    /// Remove the installer script after it ran
    #[arg(long)]
    pub cleanup: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Credential store selection shared by `install` and `login`.
#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    /// Identifier of the entry in the credential file
    #[arg(long, requires = "credentials_file")]
    pub credentials_id: Option<String>,

    /// JSON credential file
    #[arg(long, env = "RFINSTALL_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_install_flags() {
        let cli = Cli::parse_from([
            "rfinstall",
            "install",
            "--workspace",
            "/tmp/ws1",
            "--url",
            "https://example.com/cli/",
            "--cleanup",
            "--require-login",
        ]);
        let Commands::Install(args) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(args.workspace, PathBuf::from("/tmp/ws1"));
        assert_eq!(args.url.as_deref(), Some("https://example.com/cli/"));
        assert!(args.cleanup);
        assert!(args.require_login);
        assert!(!args.embedded);
    }

    #[test]
    fn test_url_conflicts_with_embedded() {
        let result = Cli::try_parse_from([
            "rfinstall",
            "install",
            "-w",
            "/tmp/ws1",
            "--url",
            "https://example.com/cli/",
            "--embedded",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_id_requires_file() {
        let result = Cli::try_parse_from(["rfinstall", "login", "--credentials-id", "rf-prod"]);
        assert!(result.is_err());

        let cli = Cli::parse_from([
            "rfinstall",
            "login",
            "--credentials-id",
            "rf-prod",
            "--credentials-file",
            "/etc/rf.json",
        ]);
        let Commands::Login(args) = cli.command else {
            panic!("expected login");
        };
        assert_eq!(args.credentials_id.as_deref(), Some("rf-prod"));
    }
}
