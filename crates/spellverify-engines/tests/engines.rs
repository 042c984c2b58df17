//! Engines driven through the `SpellEngine` interface, with dictionaries and
//! a fake pipe checker written to a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use spellverify_core::{EngineError, SpellEngine};
use spellverify_engines::{IspellPipeEngine, SpellbookEngine};

fn write_dictionary(dir: &Path, name: &str, aff: &[u8], dic: &[u8]) -> PathBuf {
    fs::write(dir.join(format!("{name}.aff")), aff).unwrap();
    fs::write(dir.join(format!("{name}.dic")), dic).unwrap();
    dir.join(name)
}

#[test]
fn spellbook_engine_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_dictionary(
        dir.path(),
        "en_TEST",
        b"SET UTF-8\nTRY esianrtolcdugmphbyfvkwz\n\nSFX S Y 1\nSFX S 0 s .\n",
        b"4\ncat/S\nthe\nwrong\nParis\n",
    );
    let mut engine = SpellbookEngine::open(&stem).unwrap();
    assert_eq!(engine.name(), "spellbook");

    assert!(engine.spell(b"cat").unwrap());
    assert!(engine.spell(b"cats").unwrap());
    assert!(!engine.spell(b"wrog").unwrap());
    assert!(!engine.spell(b"xyzzyqx").unwrap());

    assert!(engine.suggest(b"wrog").unwrap().contains(&b"wrong".to_vec()));
}

#[test]
fn dotted_dictionary_names() {
    let dir = tempfile::tempdir().unwrap();
    let stem = write_dictionary(dir.path(), "de_DE.frami", b"SET UTF-8\n", b"1\nHaus\n");
    let mut engine = SpellbookEngine::open(&stem).unwrap();
    assert!(engine.spell(b"Haus").unwrap());
}

#[test]
fn missing_dictionary_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SpellbookEngine::open(&dir.path().join("nope")).err().unwrap();
    match err {
        EngineError::Dictionary { path, .. } => {
            assert!(path.to_string_lossy().ends_with("nope.aff"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
mod pipe {
    use super::*;

    const FAKE_CHECKER: &str = r##"echo "@(#) International Ispell Version 3.2.06 (but really Fake 0.1)"
while IFS= read -r line; do
  word="${line#^}"
  case "$word" in
    cat|the) echo "*" ;;
    cats) echo "+ cat" ;;
    teh) echo "& teh 2 0: the, ten" ;;
    bad) echo "@ junk"; echo "*" ;;
    *) echo "# $word 0" ;;
  esac
  echo
done
"##;

    fn fake(dir: &Path) -> IspellPipeEngine {
        let script = dir.join("fake-ispell.sh");
        fs::write(&script, FAKE_CHECKER).unwrap();
        IspellPipeEngine::spawn(
            "fake",
            "sh",
            &[script.to_string_lossy().into_owned()],
            encoding_rs::UTF_8,
        )
        .unwrap()
    }

    #[test]
    fn spell_over_the_pipe() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = fake(dir.path());
        assert_eq!(engine.name(), "fake");
        assert!(engine.spell(b"cat").unwrap());
        assert!(engine.spell(b"cats").unwrap());
        assert!(!engine.spell(b"teh").unwrap());
        assert!(!engine.spell(b"xyzzyqx").unwrap());
    }

    #[test]
    fn suggest_over_the_pipe() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = fake(dir.path());
        assert_eq!(
            engine.suggest(b"teh").unwrap(),
            vec![b"the".to_vec(), b"ten".to_vec()]
        );
        assert!(engine.suggest(b"xyzzyqx").unwrap().is_empty());
        assert!(engine.suggest(b"the").unwrap().is_empty());
    }

    #[test]
    fn malformed_answer_does_not_shift_later_words() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = fake(dir.path());
        assert!(matches!(engine.spell(b"bad"), Err(EngineError::Protocol(_))));
        assert!(!engine.spell(b"zzz").unwrap());
        assert!(engine.spell(b"cat").unwrap());
        assert_eq!(
            engine.suggest(b"teh").unwrap(),
            vec![b"the".to_vec(), b"ten".to_vec()]
        );
    }

    #[test]
    fn child_exit_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("quitter.sh");
        fs::write(&script, "echo banner\nread -r line\n").unwrap();
        let mut engine = IspellPipeEngine::spawn(
            "quitter",
            "sh",
            &[script.to_string_lossy().into_owned()],
            encoding_rs::UTF_8,
        )
        .unwrap();
        let err = engine.spell(b"cat").unwrap_err();
        assert!(matches!(err, EngineError::Terminated | EngineError::Io(_)));
        assert!(matches!(engine.spell(b"the"), Err(EngineError::Terminated)));
    }
}
