//! Remote monitoring of gumball machines.

use crate::directory::Directory;
use crate::remote::{GumballMachineRemote, RemoteError, StateSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info};

/// Everything one report read from a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineReport {
    pub location: String,
    pub count: u32,
    pub state: StateSnapshot,
}

impl fmt::Display for MachineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gumball Machine: {}", self.location)?;
        writeln!(f, "Current inventory: {} gumballs", self.count)?;
        write!(f, "Current state: {}", self.state)
    }
}

/// Reports on one machine through its remote handle.
///
/// Nothing is cached: every report reads the machine again.
pub struct GumballMonitor<R> {
    machine: R,
}

impl<R: GumballMachineRemote> GumballMonitor<R> {
    /// Monitor `machine`.
    pub fn new(machine: R) -> Self {
        Self { machine }
    }

    /// Read location, count, and state, in that order.
    ///
    /// The three reads succeed or fail together; a failed read discards
    /// whatever was already read.
    pub fn report(&self) -> Result<MachineReport, RemoteError> {
        let location = self.machine.get_location()?;
        let count = self.machine.get_count()?;
        let state = self.machine.get_state()?;
        Ok(MachineReport {
            location,
            count,
            state,
        })
    }

    /// Print a full report to stdout, or log why it could not be read.
    ///
    /// Returns whether a report was printed.
    pub fn print_report(&self) -> bool {
        match self.report() {
            Ok(report) => {
                println!("{report}");
                true
            }
            Err(e) => {
                error!(
                    target: "gumball::monitor",
                    error = %e,
                    "Failed to read machine report"
                );
                false
            }
        }
    }
}

/// Outcome of monitoring one named machine.
#[derive(Debug)]
pub enum MonitorOutcome {
    Reported(MachineReport),
    NotFound(String),
    Failed { name: String, error: RemoteError },
}

impl MonitorOutcome {
    /// Whether a full report was read.
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }
}

/// Look each name up and report on it. One machine failing does not
/// stop the others.
pub fn monitor_all<I, S>(directory: &Directory, names: I) -> Vec<MonitorOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let handle = match directory.lookup(name) {
                Ok(handle) => handle,
                Err(e) => {
                    error!(target: "gumball::monitor", error = %e, "Lookup failed");
                    return MonitorOutcome::NotFound(name.to_string());
                }
            };
            match GumballMonitor::new(handle).report() {
                Ok(report) => {
                    info!(
                        target: "gumball::monitor",
                        name = %name,
                        count = report.count,
                        state = %report.state.name,
                        "Machine reported"
                    );
                    MonitorOutcome::Reported(report)
                }
                Err(error) => {
                    error!(
                        target: "gumball::monitor",
                        name = %name,
                        error = %error,
                        "Report aborted"
                    );
                    MonitorOutcome::Failed {
                        name: name.to_string(),
                        error,
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VendingState;
    use std::cell::Cell;

    /// Remote that fails its `fail_at`-th call.
    struct FlakyRemote {
        calls: Cell<u32>,
        fail_at: u32,
    }

    impl FlakyRemote {
        fn new(fail_at: u32) -> Self {
            Self {
                calls: Cell::new(0),
                fail_at,
            }
        }

        fn tick(&self) -> Result<(), RemoteError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_at {
                return Err(RemoteError::Disconnected {
                    location: "flaky".into(),
                });
            }
            Ok(())
        }
    }

    impl GumballMachineRemote for FlakyRemote {
        fn get_count(&self) -> Result<u32, RemoteError> {
            self.tick()?;
            Ok(4)
        }

        fn get_location(&self) -> Result<String, RemoteError> {
            self.tick()?;
            Ok("flaky".into())
        }

        fn get_state(&self) -> Result<StateSnapshot, RemoteError> {
            self.tick()?;
            Ok(StateSnapshot::of(&VendingState::NoQuarter))
        }
    }

    #[test]
    fn report_reads_all_three() {
        let monitor = GumballMonitor::new(FlakyRemote::new(0));
        let report = monitor.report().unwrap();
        assert_eq!(report.location, "flaky");
        assert_eq!(report.count, 4);
        assert_eq!(report.state.name, "NoQuarter");
        assert_eq!(monitor.machine.calls.get(), 3);
    }

    #[test]
    fn any_failed_read_fails_the_report() {
        for fail_at in 1..=3 {
            let monitor = GumballMonitor::new(FlakyRemote::new(fail_at));
            assert!(monitor.report().is_err(), "fail_at = {fail_at}");
            assert_eq!(monitor.machine.calls.get(), fail_at);
        }
    }

    #[test]
    fn failed_report_prints_nothing() {
        let monitor = GumballMonitor::new(FlakyRemote::new(2));
        assert!(!monitor.print_report());
        assert!(monitor.print_report());
    }

    #[test]
    fn report_rereads_every_time() {
        let monitor = GumballMonitor::new(FlakyRemote::new(0));
        monitor.report().unwrap();
        monitor.report().unwrap();
        assert_eq!(monitor.machine.calls.get(), 6);
    }

    #[test]
    fn report_renders_block() {
        let report = MachineReport {
            location: "santafe".into(),
            count: 12,
            state: StateSnapshot::of(&VendingState::HasQuarter),
        };
        assert_eq!(
            report.to_string(),
            "Gumball Machine: santafe\nCurrent inventory: 12 gumballs\nCurrent state: waiting for turn of crank"
        );
    }
}
