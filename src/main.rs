//! CLI entry point for the labsite tool.

// Clippy lints - strict for application code too
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod app;
mod app_config;
mod cli;
mod commands;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Everything completed.
    Success,
    /// The command aborted, or validation found errors.
    Failure,
    /// Completed, with warnings the user asked to treat as failures.
    Partial,
}

impl ProcessExit {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Partial => 2,
        }
    }
}

fn main() {
    let exit = match app::run() {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ProcessExit::Failure
        }
    };
    std::process::exit(exit.code());
}

#[cfg(test)]
mod tests {
    use super::ProcessExit;

    #[test]
    fn test_process_exit_codes() {
        assert_eq!(ProcessExit::Success.code(), 0);
        assert_eq!(ProcessExit::Failure.code(), 1);
        assert_eq!(ProcessExit::Partial.code(), 2);
    }
}
