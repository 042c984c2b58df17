// External spell checker driven through the ispell pipe protocol
//
// The child (typically `hunspell -a`) prints one banner line, then answers
// each input line with one result line per word followed by an empty line:
//
//   *              correct
//   + ROOT         correct by affixation
//   -              correct as a compound
//   & ORIG N OFF: S1, S2, ...   misspelled, N suggestions
//   ? ORIG N OFF: S1, S2, ...   misspelled, guesses
//   # ORIG OFF     misspelled, no suggestions
//
// Input lines starting with `^` are checked verbatim, so words that look
// like pipe commands are safe.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use encoding_rs::Encoding;
use spellverify_core::{EngineError, SpellEngine};

/// One parsed result line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PipeResult {
    Correct,
    Misspelled(Vec<Vec<u8>>),
}

/// Spell checker process speaking the ispell `-a` protocol.
pub struct IspellPipeEngine {
    name: String,
    encoding: &'static Encoding,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    line: Vec<u8>,
}

impl IspellPipeEngine {
    /// Start `program args...` and consume its banner.
    ///
    /// `encoding` is the encoding the child reads and writes words in; it
    /// must agree with whatever the arguments tell the child.
    pub fn spawn(
        name: impl Into<String>,
        program: &str,
        args: &[String],
        encoding: &'static Encoding,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;
        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EngineError::Protocol("child pipes unavailable".into()));
        };
        let mut engine = Self {
            name,
            encoding,
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            line: Vec::new(),
        };
        engine.read_line()?;
        tracing::debug!(
            engine = %engine.name,
            program,
            banner = %String::from_utf8_lossy(&engine.line).trim_end(),
            "pipe engine started"
        );
        Ok(engine)
    }

    /// Send one word and collect every result line up to the blank line.
    fn query(&mut self, word: &[u8]) -> Result<Vec<PipeResult>, EngineError> {
        if word.contains(&b'\n') {
            return Err(EngineError::Protocol("word contains a newline".into()));
        }
        let stdin = self.stdin.as_mut().ok_or(EngineError::Terminated)?;
        let mut request = Vec::with_capacity(word.len() + 2);
        request.push(b'^');
        request.extend_from_slice(word);
        request.push(b'\n');
        let sent = stdin.write_all(&request).and_then(|()| stdin.flush());
        if let Err(e) = sent {
            self.stdin = None;
            return Err(e.into());
        }

        // The whole answer is consumed even when a line is malformed, so the
        // next query starts on its own answer.
        let mut results = Vec::new();
        let mut malformed = None;
        loop {
            if let Err(e) = self.read_line() {
                self.stdin = None;
                return Err(e);
            }
            let line = trim_line_end(&self.line);
            if line.is_empty() {
                break;
            }
            match parse_result(line) {
                Ok(result) => results.push(result),
                Err(e) => {
                    malformed.get_or_insert(e);
                }
            }
        }
        match malformed {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }

    /// Read one line into `self.line`. End of output means the child is gone.
    fn read_line(&mut self) -> Result<(), EngineError> {
        self.line.clear();
        if self.stdout.read_until(b'\n', &mut self.line)? == 0 {
            return Err(EngineError::Terminated);
        }
        Ok(())
    }
}

impl SpellEngine for IspellPipeEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn dictionary_encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn spell(&mut self, word: &[u8]) -> Result<bool, EngineError> {
        let results = self.query(word)?;
        Ok(results.iter().all(|r| *r == PipeResult::Correct))
    }

    fn suggest(&mut self, word: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        let results = self.query(word)?;
        Ok(results
            .into_iter()
            .find_map(|r| match r {
                PipeResult::Misspelled(sugs) => Some(sugs),
                PipeResult::Correct => None,
            })
            .unwrap_or_default())
    }
}

impl Drop for IspellPipeEngine {
    fn drop(&mut self) {
        // Closing stdin makes the child exit on its own.
        drop(self.stdin.take());
        if let Err(e) = self.child.wait() {
            tracing::debug!(engine = %self.name, error = %e, "failed to reap pipe engine");
        }
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn parse_result(line: &[u8]) -> Result<PipeResult, EngineError> {
    match line[0] {
        b'*' | b'+' | b'-' => Ok(PipeResult::Correct),
        b'#' => Ok(PipeResult::Misspelled(Vec::new())),
        b'&' | b'?' => {
            let Some(colon) = line.windows(2).position(|w| w == b": ") else {
                return Ok(PipeResult::Misspelled(Vec::new()));
            };
            let sugs = line[colon + 2..]
                .split(|&b| b == b',')
                .map(|s| s.trim_ascii().to_vec())
                .filter(|s| !s.is_empty())
                .collect();
            Ok(PipeResult::Misspelled(sugs))
        }
        other => Err(EngineError::Protocol(format!(
            "unexpected result line starting with {:?}",
            char::from(other)
        ))),
    }
}
