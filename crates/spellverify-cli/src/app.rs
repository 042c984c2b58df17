// One verification run: arguments in, report out

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use encoding_rs::Encoding;
use spellverify_core::Engine;
use spellverify_core::encoding::{encoding_for_label, encoding_for_locale};
use spellverify_harness::{HarnessConfig, Report, ReportError, Session};

use crate::engine_spec::{DEFAULT_ENGINE_A, DEFAULT_ENGINE_B, EngineSpec};
use crate::environment::{Environment, dictionary_name_from_locale};
use crate::error::CliError;
use crate::locate::{locate, search_paths};

/// Compare a spell checker (engine A) against a reference (engine B).
///
/// Words are read one per line from FILEs, or stdin when none are given.
/// Both engines check every word; the agreement, timing and, with -c,
/// suggestion quality are summarised on stdout.
#[derive(Debug, Parser)]
#[command(name = "spellverify", version)]
pub struct Cli {
    /// Dictionary name or path stem (default: derived from the locale)
    #[arg(short = 'd', long = "dictionary", value_name = "DICT")]
    pub dictionaries: Vec<String>,

    /// Input encoding (default: the locale's codeset)
    #[arg(short = 'i', long = "input-encoding", value_name = "ENC")]
    pub input_encoding: Option<String>,

    /// Corrections file: misspelled word, tab, expected correction
    #[arg(short = 'c', long = "corrections", value_name = "TSV")]
    pub corrections: Vec<PathBuf>,

    /// Print words the engines disagree on
    #[arg(short = 'f', long = "print-false")]
    pub print_false: bool,

    /// Also time suggestions for words both engines reject
    #[arg(short = 's', long = "suggestions")]
    pub test_suggestions: bool,

    /// Engine under test: 'spellbook' or 'ispell:PROGRAM ARGS...'
    #[arg(long, value_name = "SPEC", default_value = DEFAULT_ENGINE_A)]
    pub engine_a: String,

    /// Reference engine; {dict} and {enc} are substituted in pipe arguments
    #[arg(long, value_name = "SPEC", default_value = DEFAULT_ENGINE_B)]
    pub engine_b: String,

    /// Print the report as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Word lists to check
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// How a run ended when it did not fail.
#[derive(Debug)]
pub enum Outcome {
    Reported(Report),
    /// The statistics were degenerate; no metrics were printed.
    NoMetrics(ReportError),
}

/// Execute a run. The report and any false-word lines go to `out`.
pub fn run<R: BufRead, W: Write>(
    cli: &Cli,
    env: &Environment,
    stdin: R,
    out: &mut W,
) -> Result<Outcome, CliError> {
    let encoding = input_encoding(cli, env)?;
    let dictionary = dictionary_path(cli, env)?;
    tracing::info!(encoding = encoding.name(), "input encoding");
    tracing::info!(path = %dictionary.display(), "dictionary");

    let spec_a: EngineSpec = cli.engine_a.parse()?;
    let spec_b: EngineSpec = cli.engine_b.parse()?;
    let engine_a = spec_a.build(Engine::A, &dictionary)?;
    let engine_b = spec_b.build(Engine::B, &dictionary)?;

    let config = HarnessConfig {
        print_false: cli.print_false,
        test_suggestions: cli.test_suggestions,
    };
    let mut session = Session::new(engine_a, engine_b, config);

    if cli.files.is_empty() {
        session.process_primary(stdin, encoding, out)?;
    } else {
        for path in &cli.files {
            let file = File::open(path).map_err(|source| CliError::Input {
                path: path.clone(),
                source,
            })?;
            session.process_primary(BufReader::new(file), encoding, out)?;
        }
    }

    if let Some(path) = first_with_warning(&cli.corrections, "-c") {
        match File::open(path) {
            Ok(file) => session.process_corrections(BufReader::new(file), encoding, out)?,
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "cannot open corrections file, suggestions are not compared"
            ),
        }
    }

    let totals = session.totals();
    match Report::derive(&totals) {
        Ok(report) => {
            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                write!(out, "{report}")?;
            }
            Ok(Outcome::Reported(report))
        }
        Err(e) => {
            eprintln!("{e}");
            tracing::debug!(?totals, "raw counters");
            Ok(Outcome::NoMetrics(e))
        }
    }
}

fn input_encoding(cli: &Cli, env: &Environment) -> Result<&'static Encoding, CliError> {
    match &cli.input_encoding {
        Some(label) => {
            encoding_for_label(label).ok_or_else(|| CliError::UnknownEncoding(label.clone()))
        }
        None => {
            let locale = env.locale_or_default();
            encoding_for_locale(locale).ok_or_else(|| CliError::UnknownEncoding(locale.to_string()))
        }
    }
}

fn dictionary_path(cli: &Cli, env: &Environment) -> Result<PathBuf, CliError> {
    let name = match first_with_warning(&cli.dictionaries, "-d") {
        Some(name) => name.as_str(),
        None => env
            .locale
            .as_deref()
            .and_then(dictionary_name_from_locale)
            .ok_or(CliError::NoDictionary)?,
    };
    let search = search_paths(env);
    locate(name, &search).ok_or_else(|| CliError::DictionaryNotFound {
        name: name.to_string(),
        searched: search.len(),
    })
}

/// Only the first occurrence of a repeatable option is used.
fn first_with_warning<'a, T: std::fmt::Debug>(values: &'a [T], flag: &str) -> Option<&'a T> {
    if values.len() > 1 {
        tracing::warn!(
            flag,
            ignored = ?&values[1..],
            "option given more than once, using the first"
        );
    }
    values.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["spellverify"]).unwrap();
        assert!(cli.dictionaries.is_empty());
        assert_eq!(cli.engine_a, DEFAULT_ENGINE_A);
        assert_eq!(cli.engine_b, DEFAULT_ENGINE_B);
        assert!(!cli.json && !cli.print_false && !cli.test_suggestions);
    }

    #[test]
    fn short_flags_and_files() {
        let cli = Cli::try_parse_from([
            "spellverify", "-d", "en_US", "-d", "de_DE", "-i", "UTF-8", "-c", "cor.tsv", "-f",
            "-s", "a.txt", "b.txt",
        ])
        .unwrap();
        assert_eq!(cli.dictionaries, ["en_US", "de_DE"]);
        assert_eq!(cli.input_encoding.as_deref(), Some("UTF-8"));
        assert_eq!(cli.corrections, [PathBuf::from("cor.tsv")]);
        assert!(cli.print_false && cli.test_suggestions);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = Cli::try_parse_from(["spellverify", "-x"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn encoding_resolution() {
        let env = Environment {
            locale: Some("en_US.ISO-8859-1".into()),
            ..Environment::default()
        };
        let cli = Cli::try_parse_from(["spellverify"]).unwrap();
        assert_eq!(input_encoding(&cli, &env).unwrap(), encoding_rs::WINDOWS_1252);

        let cli = Cli::try_parse_from(["spellverify", "-i", "KOI8-R"]).unwrap();
        assert_eq!(input_encoding(&cli, &env).unwrap(), encoding_rs::KOI8_R);

        let cli = Cli::try_parse_from(["spellverify", "-i", "bogus"]).unwrap();
        assert!(matches!(input_encoding(&cli, &env), Err(CliError::UnknownEncoding(_))));

        let cli = Cli::try_parse_from(["spellverify"]).unwrap();
        assert_eq!(input_encoding(&cli, &Environment::default()).unwrap(), encoding_rs::UTF_8);
    }

    #[test]
    fn no_dictionary_without_locale() {
        let cli = Cli::try_parse_from(["spellverify"]).unwrap();
        assert!(matches!(
            dictionary_path(&cli, &Environment::default()),
            Err(CliError::NoDictionary)
        ));
    }
}
