// src/exec/signal.rs

//! Exit-status inspection and signal re-delivery.
//!
//! On Unix a child either exits with a code or is killed by a signal. When
//! the signal is SIGINT or SIGTERM the executor can raise the same signal on
//! this process, so shells and supervisors see the real cause of death.

use std::io;
use std::process::ExitStatus;

/// How a child process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(String),
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;

            if let Some(signo) = status.signal() {
                return Termination::Signaled(signal_name(signo));
            }
        }

        // Neither a code nor a signal; only reachable on exotic platforms.
        Termination::Exited(-1)
    }
}

/// Only interrupt- and terminate-class signals are re-delivered.
pub fn is_forwardable(name: &str) -> bool {
    matches!(name, "SIGINT" | "SIGTERM")
}

#[cfg(unix)]
pub fn signal_name(signo: i32) -> String {
    use nix::sys::signal::Signal;

    Signal::try_from(signo)
        .map(|sig| sig.as_str().to_string())
        .unwrap_or_else(|_| format!("SIG{signo}"))
}

#[cfg(not(unix))]
pub fn signal_name(signo: i32) -> String {
    format!("SIG{signo}")
}

#[cfg(unix)]
pub fn signal_number(name: &str) -> Option<i32> {
    use nix::sys::signal::Signal;

    name.parse::<Signal>().ok().map(|sig| sig as i32)
}

#[cfg(not(unix))]
pub fn signal_number(_name: &str) -> Option<i32> {
    None
}

/// Raise `name` on the current process.
#[cfg(unix)]
pub fn reraise(name: &str) -> io::Result<()> {
    use nix::sys::signal::{raise, Signal};

    let sig: Signal = name
        .parse()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("unknown signal {name}")))?;
    raise(sig).map_err(io::Error::from)
}

#[cfg(not(unix))]
pub fn reraise(name: &str) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot re-raise {name} on this platform"),
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn exit_codes_and_signals_are_told_apart() {
        assert_eq!(Termination::from(ExitStatus::from_raw(0)), Termination::Exited(0));
        assert_eq!(Termination::from(ExitStatus::from_raw(2 << 8)), Termination::Exited(2));
        assert_eq!(
            Termination::from(ExitStatus::from_raw(15)),
            Termination::Signaled("SIGTERM".to_string())
        );
    }

    #[test]
    fn names_and_numbers_round_trip() {
        assert_eq!(signal_name(2), "SIGINT");
        assert_eq!(signal_number("SIGKILL"), Some(9));
        assert_eq!(signal_number("SIGBOGUS"), None);
    }

    #[test]
    fn only_int_and_term_are_forwardable() {
        assert!(is_forwardable("SIGINT"));
        assert!(is_forwardable("SIGTERM"));
        assert!(!is_forwardable("SIGKILL"));
        assert!(!is_forwardable("SIGHUP"));
    }
}
