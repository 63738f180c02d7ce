mod cli;
mod error;
mod file_handler;
mod logger;
mod orchestrator;
mod processing;

pub use cli::Cli;
pub use orchestrator::run_app;

// Macros for use by child modules of app (orchestrator, processing, file_handler).
// `super::logger` resolves to `app::logger` when expanded in a sibling module.
macro_rules! verbose_println {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            super::logger::log_verbose_message_args(format_args!($($arg)*));
        }
    };
}

macro_rules! verbose_eprintln {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            super::logger::log_verbose_error_args(format_args!($($arg)*));
        }
    };
}

// Bring the macros into scope for the sibling modules.
use verbose_eprintln;
use verbose_println;
