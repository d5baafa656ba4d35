//! Logical commands from a zsh extended history file.
//!
//! Each entry starts with a `: <start>:<elapsed>;` header. A command whose
//! text ends in `\` continues on the following physical lines, which carry
//! no header.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::compile_regex;
use crate::shell::is_space;

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| compile_regex(r"^: \d+:\d+;(.*)"));

/// Open a history file for reading.
pub fn open(path: &Path) -> io::Result<HistoryReader<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(HistoryReader::new(BufReader::new(file)))
}

/// Iterator over logical commands, with continuations joined and
/// backslashes removed.
///
/// Lines are decoded lossily. A read error ends the iteration and can be
/// retrieved with [`HistoryReader::take_error`]. A continuation still open
/// at end of input is discarded.
pub struct HistoryReader<R> {
    reader: R,
    buf: Vec<u8>,
    error: Option<io::Error>,
    done: bool,
}

impl<R: BufRead> HistoryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            error: None,
            done: false,
        }
    }

    /// The error that stopped iteration, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn next_line(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(String::from_utf8_lossy(&self.buf).into_owned())
            }
            Err(e) => {
                self.error = Some(e);
                self.done = true;
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for HistoryReader<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut current = String::new();
        let mut continuing = false;

        loop {
            let line = self.next_line()?;
            let part = if continuing {
                line.trim_matches(is_space).to_string()
            } else {
                match ENTRY_RE.captures(&line).and_then(|c| c.get(1)) {
                    Some(m) => m.as_str().to_string(),
                    None => continue,
                }
            };

            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&part);
            continuing = true;

            if !current.ends_with('\\') {
                return Some(current.replace('\\', ""));
            }
        }
    }
}
