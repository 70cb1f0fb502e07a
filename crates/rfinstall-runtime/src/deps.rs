//! Host tool availability checks.
//!
//! The installer script shells out to tools such as `curl`; their presence
//! is verified with a `PATH` lookup before any network call is made.

use std::path::PathBuf;

use rfinstall_core::{InstallError, InstallResult, LogSinkPort};
use tracing::debug;

/// Port for locating host executables.
pub trait DependencyProbePort: Send + Sync {
    /// Absolute path of `tool`, or `None` when it is not installed.
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// Looks tools up on the process `PATH`, like `command -v`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathDependencyProbe;

impl DependencyProbePort for PathDependencyProbe {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}

/// Availability of one required tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    pub const fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Report the availability of every tool without failing.
pub fn tool_report(probe: &dyn DependencyProbePort, tools: &[String]) -> Vec<ToolStatus> {
    tools
        .iter()
        .map(|name| ToolStatus {
            name: name.clone(),
            path: probe.locate(name),
        })
        .collect()
}

/// Require every tool in `tools`, stopping at the first missing one.
pub fn check_required_tools(
    probe: &dyn DependencyProbePort,
    tools: &[String],
    sink: &dyn LogSinkPort,
) -> InstallResult<()> {
    for tool in tools {
        sink.append(format!("Checking for '{tool}' command availability..."));
        match probe.locate(tool) {
            Some(path) => {
                debug!(tool = %tool, path = %path.display(), "found required tool");
                sink.append(format!("'{tool}' is available on the system."));
            }
            None => {
                return Err(InstallError::DependencyMissing { tool: tool.clone() });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfinstall_core::BufferedLogSink;
    use std::collections::HashSet;

    struct FixedProbe(HashSet<&'static str>);

    impl DependencyProbePort for FixedProbe {
        fn locate(&self, tool: &str) -> Option<PathBuf> {
            self.0
                .contains(tool)
                .then(|| PathBuf::from(format!("/usr/bin/{tool}")))
        }
    }

    fn tools(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_all_present() {
        let probe = FixedProbe(["curl", "sh"].into_iter().collect());
        let sink = BufferedLogSink::new();
        check_required_tools(&probe, &tools(&["curl", "sh"]), &sink).unwrap();
        assert_eq!(
            sink.lines(),
            vec![
                "Checking for 'curl' command availability...",
                "'curl' is available on the system.",
                "Checking for 'sh' command availability...",
                "'sh' is available on the system.",
            ]
        );
    }

    #[test]
    fn test_missing_tool_stops_check() {
        let probe = FixedProbe(HashSet::new());
        let sink = BufferedLogSink::new();
        let err = check_required_tools(&probe, &tools(&["curl", "sh"]), &sink).unwrap_err();
        assert!(err.is_dependency_missing());
        assert!(err.to_string().contains("'curl' command not found"));
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_report_lists_every_tool() {
        let probe = FixedProbe(["sh"].into_iter().collect());
        let report = tool_report(&probe, &tools(&["curl", "sh"]));
        assert!(!report[0].is_available());
        assert!(report[1].is_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_path_probe_finds_shell() {
        assert!(PathDependencyProbe.locate("sh").is_some());
        assert!(
            PathDependencyProbe
                .locate("definitely_not_a_real_command_12345")
                .is_none()
        );
    }
}
