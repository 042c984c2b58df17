// Engine selection from the command line
//
// `spellbook`                 in-process Hunspell dictionary engine
// `ispell:PROGRAM ARGS...`    external checker over the ispell pipe
//
// Pipe arguments may contain `{dict}` (dictionary path stem) and `{enc}`
// (dictionary encoding name), substituted before the program starts.

use std::path::Path;
use std::str::FromStr;

use spellverify_core::{Engine, SpellEngine};
use spellverify_engines::aff::{AffixHeader, with_suffix};
use spellverify_engines::{IspellPipeEngine, SpellbookEngine};

use crate::error::CliError;

pub const DEFAULT_ENGINE_A: &str = "spellbook";
pub const DEFAULT_ENGINE_B: &str = "ispell:hunspell -a -i {enc} -d {dict}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSpec {
    Spellbook,
    Pipe { program: String, args: Vec<String> },
}

impl FromStr for EngineSpec {
    type Err = CliError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CliError::EngineSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        if spec == "spellbook" {
            return Ok(EngineSpec::Spellbook);
        }
        let Some(command) = spec.strip_prefix("ispell:") else {
            return Err(invalid("expected 'spellbook' or 'ispell:PROGRAM ARGS...'"));
        };
        let mut words = command.split_whitespace().map(str::to_string);
        let Some(program) = words.next() else {
            return Err(invalid("missing program"));
        };
        Ok(EngineSpec::Pipe {
            program,
            args: words.collect(),
        })
    }
}

impl EngineSpec {
    /// Start the engine on the dictionary at `stem`.
    pub fn build(&self, which: Engine, stem: &Path) -> Result<Box<dyn SpellEngine>, CliError> {
        let engine_error = |source| CliError::Engine { which, source };
        match self {
            EngineSpec::Spellbook => {
                let engine = SpellbookEngine::open(stem).map_err(engine_error)?;
                Ok(Box::new(engine))
            }
            EngineSpec::Pipe { program, args } => {
                let aff_path = with_suffix(stem, ".aff");
                let aff = std::fs::read(&aff_path).map_err(|e| CliError::Input {
                    path: aff_path.clone(),
                    source: e,
                })?;
                let encoding = AffixHeader::parse(&aff)
                    .map_err(|e| CliError::UnknownEncoding(e.0))?
                    .encoding();
                let stem = stem.to_string_lossy();
                let args: Vec<String> = args
                    .iter()
                    .map(|a| a.replace("{dict}", &stem).replace("{enc}", encoding.name()))
                    .collect();
                let name = Path::new(program)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| program.clone());
                let engine = IspellPipeEngine::spawn(name, program, &args, encoding)
                    .map_err(engine_error)?;
                Ok(Box::new(engine))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spellbook() {
        assert_eq!("spellbook".parse::<EngineSpec>().unwrap(), EngineSpec::Spellbook);
    }

    #[test]
    fn parse_default_reference() {
        let spec: EngineSpec = DEFAULT_ENGINE_B.parse().unwrap();
        assert_eq!(
            spec,
            EngineSpec::Pipe {
                program: "hunspell".into(),
                args: vec!["-a".into(), "-i".into(), "{enc}".into(), "-d".into(), "{dict}".into()],
            }
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "aspell".parse::<EngineSpec>(),
            Err(CliError::EngineSpec { .. })
        ));
        assert!(matches!(
            "ispell:   ".parse::<EngineSpec>(),
            Err(CliError::EngineSpec { .. })
        ));
    }

    #[test]
    fn spellbook_on_missing_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineSpec::Spellbook
            .build(Engine::A, &dir.path().join("none"))
            .err()
            .unwrap();
        assert!(matches!(err, CliError::Engine { which: Engine::A, .. }));
    }
}
