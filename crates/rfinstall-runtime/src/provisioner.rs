//! Installation orchestrator.
//!
//! [`Provisioner`] drives one installation through the step sequence in
//! [`InstallStep`] order, awaiting each step to completion before the next
//! one starts. The first failure stops the run; nothing is retried.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rfinstall_core::{
    ConfigError, CredentialSource, CredentialStorePort, Credentials, InstallConfig, InstallError,
    InstallProgress, InstallResult, InstallStep, LogSinkPort, LoginError, process_env,
    resolve_credentials, validate_workspace,
};
use tracing::{error, info, warn};

use crate::command::{CommandLine, CommandRunnerPort, ProcessCommandRunner};
use crate::deps::{DependencyProbePort, PathDependencyProbe, check_required_tools};
use crate::installer::ScriptFetcher;

/// Environment variable lookup. Blank values are treated as unset.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Installs the RapidFort CLI into a workspace and optionally logs it in.
pub struct Provisioner {
    config: InstallConfig,
    fetcher: ScriptFetcher,
    runner: Arc<dyn CommandRunnerPort>,
    probe: Arc<dyn DependencyProbePort>,
    credential_store: Option<Arc<dyn CredentialStorePort>>,
    env: EnvLookup,
}

impl fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provisioner")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher)
            .field("credential_store", &self.credential_store.is_some())
            .finish_non_exhaustive()
    }
}

impl Provisioner {
    /// Provisioner wired to real processes, the process `PATH` and the
    /// process environment. Fails if `config` does not validate.
    pub fn new(config: InstallConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let runner = ProcessCommandRunner::new()
            .with_timeout(config.command_timeout_secs.map(Duration::from_secs));
        let env: EnvLookup = Arc::new(process_env);
        Ok(Self {
            fetcher: ScriptFetcher::from_config(&config),
            runner: Arc::new(runner),
            probe: Arc::new(PathDependencyProbe),
            credential_store: None,
            env,
            config,
        })
    }

    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunnerPort>) -> Self {
        self.runner = runner;
        self
    }

    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn DependencyProbePort>) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStorePort>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Replace the environment lookup.
    #[must_use]
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(move |name| env(name).filter(|v| !v.trim().is_empty()));
        self
    }

    pub const fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Resolve credentials with the configured strategy.
    pub fn resolve_credentials(&self) -> Result<Option<Credentials>, LoginError> {
        resolve_credentials(
            &self.config.credentials,
            self.credential_store.as_deref(),
            |name| (self.env)(name),
        )
    }

    /// Run the full installation in `workspace`.
    ///
    /// Every failure is echoed to `sink` before it is returned.
    pub async fn install(&self, workspace: &Path, sink: &dyn LogSinkPort) -> InstallResult<()> {
        let mut progress = InstallProgress::new();
        self.install_with_progress(workspace, sink, &mut progress).await
    }

    /// Like [`install`](Self::install), recording the steps taken in
    /// `progress`. `progress` must be fresh; on return it is either
    /// [`InstallState::Done`](rfinstall_core::InstallState::Done) or
    /// [`InstallState::Failed`](rfinstall_core::InstallState::Failed).
    pub async fn install_with_progress(
        &self,
        workspace: &Path,
        sink: &dyn LogSinkPort,
        progress: &mut InstallProgress,
    ) -> InstallResult<()> {
        sink.append("Starting Rapidfort installation...".to_string());

        match self.run_steps(workspace, sink, progress).await {
            Ok(()) => {
                progress.finish();
                info!(
                    workspace = %workspace.display(),
                    steps = ?progress.completed(),
                    "installation finished"
                );
                Ok(())
            }
            Err(err) => {
                let step = progress.fail(err.to_string());
                error!(%step, error = %err, "installation failed");
                sink.append(format!("Exception occurred: {err}"));
                sink.append(format!("Installation failed at step '{step}'."));
                Err(err)
            }
        }
    }

    async fn run_steps(
        &self,
        workspace: &Path,
        sink: &dyn LogSinkPort,
        progress: &mut InstallProgress,
    ) -> InstallResult<()> {
        progress.advance(InstallStep::ResolvingCredentials)?;
        let credentials = self.resolve_credentials()?;
        if credentials.is_none() {
            if self.config.require_login {
                return Err(LoginError::unavailable(missing_credentials_reason(
                    &self.config.credentials,
                ))
                .into());
            }
            info!("no credentials resolved; login will be skipped");
        }

        progress.advance(InstallStep::CheckingDependency)?;
        check_required_tools(self.probe.as_ref(), &self.config.required_tools, sink)?;

        sink.append("Installing RapidFort CLI...".to_string());

        progress.advance(InstallStep::Fetching)?;
        validate_workspace(workspace)?;
        let script = self
            .fetcher
            .fetch(&self.config.script_source, workspace, sink)
            .await?;
        let script_arg = script.display().to_string();

        let outcome = self
            .run_installer(&script_arg, workspace, sink, progress)
            .await;
        self.cleanup(outcome, &script_arg, sink, progress).await?;

        sink.append("RapidFort CLI installation completed successfully.".to_string());

        if let Some(credentials) = credentials {
            progress.advance(InstallStep::LoggingIn)?;
            // Failures are echoed once, by `install_with_progress`.
            sink.append("Logging into RapidFort...".to_string());
            self.run_login(sink, Some(&credentials)).await?;
        }
        Ok(())
    }

    async fn run_installer(
        &self,
        script: &str,
        workspace: &Path,
        sink: &dyn LogSinkPort,
        progress: &mut InstallProgress,
    ) -> InstallResult<()> {
        progress.advance(InstallStep::MakingExecutable)?;
        let chmod = CommandLine::new("chmod").arg("+x").arg(script);
        self.run_step(InstallStep::MakingExecutable, &chmod, sink).await?;

        progress.advance(InstallStep::Executing)?;
        let exec = CommandLine::new(script).current_dir(workspace);
        self.run_step(InstallStep::Executing, &exec, sink).await
    }

    /// Remove the script when configured to.
    ///
    /// After a successful run a failed removal fails the installation. After
    /// a failed run removal is still attempted, but only the first error
    /// is returned.
    async fn cleanup(
        &self,
        outcome: InstallResult<()>,
        script: &str,
        sink: &dyn LogSinkPort,
        progress: &mut InstallProgress,
    ) -> InstallResult<()> {
        if !self.config.cleanup_after_install {
            return outcome;
        }
        let rm = CommandLine::new("rm").arg(script);

        match outcome {
            Ok(()) => {
                progress.advance(InstallStep::Cleanup)?;
                self.run_step(InstallStep::Cleanup, &rm, sink).await
            }
            Err(err) => {
                match self.runner.run(&rm, sink).await {
                    Ok(true) => {}
                    Ok(false) => warn!(script, "installer script removal failed"),
                    Err(e) => warn!(script, error = %e, "installer script removal failed"),
                }
                Err(err)
            }
        }
    }

    async fn run_step(
        &self,
        step: InstallStep,
        command: &CommandLine,
        sink: &dyn LogSinkPort,
    ) -> InstallResult<()> {
        info!(%step, "running install step");
        match self.runner.run(command, sink).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(InstallError::CommandFailed {
                step,
                detail: format!("{command} exited unsuccessfully"),
            }),
            Err(e) => Err(InstallError::CommandFailed {
                step,
                detail: e.to_string(),
            }),
        }
    }

    /// Authenticate the installed CLI.
    ///
    /// Nothing is spawned unless both halves of the pair are present. Every
    /// failure is echoed to `sink` before it is returned.
    pub async fn login(
        &self,
        sink: &dyn LogSinkPort,
        credentials: Option<&Credentials>,
    ) -> Result<(), LoginError> {
        sink.append("Logging into RapidFort...".to_string());

        let result = self.run_login(sink, credentials).await;
        if let Err(e) = &result {
            error!(error = %e, "login failed");
            sink.append(format!("Exception occurred: {e}"));
        }
        result
    }

    async fn run_login(
        &self,
        sink: &dyn LogSinkPort,
        credentials: Option<&Credentials>,
    ) -> Result<(), LoginError> {
        let credentials = credentials.filter(|c| c.is_complete()).ok_or_else(|| {
            LoginError::unavailable(missing_credentials_reason(&self.config.credentials))
        })?;

        let command_name = &self.config.login_command;
        let command = CommandLine::new(command_name.as_str())
            .arg(credentials.username())
            .secret_arg(credentials.secret());

        match self.runner.run(&command, sink).await {
            Ok(true) => {
                info!(command = %command_name, "login succeeded");
                Ok(())
            }
            Ok(false) => Err(LoginError::LoginFailed {
                command: command_name.clone(),
            }),
            Err(e) => Err(LoginError::CommandFailed {
                command: command_name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Resolve credentials and log in, without installing.
    pub async fn login_configured(&self, sink: &dyn LogSinkPort) -> Result<(), LoginError> {
        match self.resolve_credentials() {
            Ok(credentials) => self.login(sink, credentials.as_ref()).await,
            Err(e) => {
                sink.append(format!("Exception occurred: {e}"));
                Err(e)
            }
        }
    }
}

fn missing_credentials_reason(source: &CredentialSource) -> String {
    match source {
        CredentialSource::Environment {
            id_var,
            password_var,
        } => format!("Credentials for {id_var} or {password_var} are not set."),
        CredentialSource::Store { id } => format!("Could not find credentials with ID: {id}"),
        CredentialSource::None => "No credential source is configured.".to_string(),
    }
}
