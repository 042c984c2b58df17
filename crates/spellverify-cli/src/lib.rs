// spellverify-cli: argument handling, dictionary discovery and the run loop
// behind the `spellverify` binary.

pub mod app;
pub mod engine_spec;
pub mod environment;
pub mod error;
pub mod locate;
pub mod logging;

pub use app::{Cli, Outcome, run};
pub use environment::Environment;
pub use error::CliError;

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(1);
}
