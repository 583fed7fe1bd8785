//! Verbosity-gated stderr logging for the assignment generator.
//!
//! Arguments are only formatted when the level is enabled.
//! - 0: silent
//! - 1: changes (assignments created, fill counts)
//! - 2: checks (why staff were left out, shortfalls)
//! - 3: debug (pool contents)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Name shown for a verbosity setting. Anything above debug is debug.
pub fn level_name(verbosity: u8) -> &'static str {
    match verbosity {
        VERBOSITY_SILENT => "silent",
        VERBOSITY_CHANGES => "changes",
        VERBOSITY_CHECKS => "checks",
        _ => "debug",
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:expr, $verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $level {
            eprintln!($($arg)*);
        }
    };
}

/// Assignments created and per-requirement fill counts.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_CHANGES, $verbosity, $($arg)*)
    };
}

/// Candidate exclusions and shortfalls.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_CHECKS, $verbosity, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_DEBUG, $verbosity, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(VERBOSITY_SILENT), "silent");
        assert_eq!(level_name(VERBOSITY_CHECKS), "checks");
        assert_eq!(level_name(9), "debug");
    }

    #[test]
    fn test_disabled_levels_skip_formatting() {
        struct Loud;
        impl std::fmt::Display for Loud {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                panic!("formatted while disabled")
            }
        }
        log_changes!(VERBOSITY_SILENT, "{}", Loud);
        log_checks!(VERBOSITY_CHANGES, "{}", Loud);
        log_debug!(VERBOSITY_CHECKS, "{}", Loud);
    }
}
