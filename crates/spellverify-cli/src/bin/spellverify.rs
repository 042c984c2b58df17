// spellverify: compare a spell checker against a reference engine.
//
// Reads words (one per line) from the given files or stdin, runs every word
// through both engines and prints agreement, timing and suggestion-quality
// figures.
//
// Usage:
//   spellverify [-d DICT] [-i ENC] [-c TSV] [-f] [-s] [--json] [FILE...]
//
// Exit status: 0 on success (including "no input"), 1 on fatal errors,
// 2 on invalid arguments.

use std::io::{self, Write};

use clap::Parser;
use spellverify_cli::{Cli, CliError, Environment};

fn main() {
    let cli = Cli::parse();
    spellverify_cli::logging::init();

    let env = Environment::from_process();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let result = spellverify_cli::run(&cli, &env, stdin.lock(), &mut out)
        .and_then(|_| out.flush().map_err(CliError::from));
    if let Err(e) = result {
        drop(out);
        spellverify_cli::fatal(&e.to_string());
    }
}
