//! Provisioning steps and the state machine that orders them.
//!
//! A run moves strictly forward through [`InstallStep`] in declaration
//! order. Optional steps may be skipped, but a step can never be revisited,
//! and once the run has failed no further step can be entered.

use std::fmt;
use thiserror::Error;

/// One phase of the provisioning workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstallStep {
    ResolvingCredentials,
    CheckingDependency,
    Fetching,
    MakingExecutable,
    Executing,
    Cleanup,
    LoggingIn,
}

impl InstallStep {
    /// Human-readable step name used in log lines and errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ResolvingCredentials => "resolving credentials",
            Self::CheckingDependency => "checking dependencies",
            Self::Fetching => "fetching installer script",
            Self::MakingExecutable => "making installer executable",
            Self::Executing => "executing installer",
            Self::Cleanup => "removing installer script",
            Self::LoggingIn => "logging in",
        }
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a run currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    /// No step has started yet.
    Pending,
    /// The given step is in progress.
    Running(InstallStep),
    /// Every step succeeded.
    Done,
    /// The run stopped at `step`.
    Failed { step: InstallStep, reason: String },
}

/// An attempted transition that would break step ordering.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid step transition from {from:?} to {to}")]
pub struct TransitionError {
    pub from: InstallState,
    pub to: InstallStep,
}

/// Forward-only tracker for a single run.
#[derive(Debug)]
pub struct InstallProgress {
    state: InstallState,
    completed: Vec<InstallStep>,
}

impl Default for InstallProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallProgress {
    pub const fn new() -> Self {
        Self {
            state: InstallState::Pending,
            completed: Vec::new(),
        }
    }

    pub const fn state(&self) -> &InstallState {
        &self.state
    }

    /// Steps that finished successfully, in order.
    pub fn completed(&self) -> &[InstallStep] {
        &self.completed
    }

    /// The step currently running, if any.
    pub const fn current(&self) -> Option<InstallStep> {
        match self.state {
            InstallState::Running(step) => Some(step),
            _ => None,
        }
    }

    /// Enter `next`, marking the current step as completed.
    pub fn advance(&mut self, next: InstallStep) -> Result<(), TransitionError> {
        match self.state {
            InstallState::Pending => {}
            InstallState::Running(current) if next > current => {
                self.completed.push(current);
            }
            _ => {
                return Err(TransitionError {
                    from: self.state.clone(),
                    to: next,
                });
            }
        }
        tracing::debug!(step = %next, "entering install step");
        self.state = InstallState::Running(next);
        Ok(())
    }

    /// Mark the run as successfully finished.
    pub fn finish(&mut self) {
        if let InstallState::Running(current) = self.state {
            self.completed.push(current);
        }
        if !matches!(self.state, InstallState::Failed { .. }) {
            self.state = InstallState::Done;
        }
    }

    /// Mark the current step as failed. Returns the failed step.
    ///
    /// Failing before any step started attributes the failure to the first
    /// step of the workflow.
    pub fn fail(&mut self, reason: impl Into<String>) -> InstallStep {
        let step = match &self.state {
            InstallState::Running(step) => *step,
            InstallState::Failed { step, .. } => *step,
            InstallState::Pending | InstallState::Done => InstallStep::ResolvingCredentials,
        };
        self.state = InstallState::Failed {
            step,
            reason: reason.into(),
        };
        step
    }
}
