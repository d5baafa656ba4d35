//! Quote-aware tokenization of a single command line.

use serde::{Deserialize, Serialize};

/// Handling of a `"` that no later quote can close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnclosedQuote {
    /// The quote matches nothing: it is discarded and splits tokens.
    #[default]
    Drop,
    /// The quote is kept as an ordinary token character.
    Literal,
}

/// Tokenize a command line, dropping unclosed quotes.
///
/// Tokens are separated by whitespace and commas. A double-quoted span
/// (where `\` escapes the next character) is atomic, and its quotes are
/// kept in the token. Tokens borrow from `line` and are never empty.
pub fn tokenize(line: &str) -> Vec<&str> {
    tokenize_with(line, UnclosedQuote::Drop)
}

/// Tokenize a command line with an explicit unclosed-quote policy.
pub fn tokenize_with(line: &str, unclosed: UnclosedQuote) -> Vec<&str> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let closers = quote_closers(&chars);
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = i;
        while i < chars.len() {
            let c = chars[i].1;
            if is_separator(c) {
                break;
            }
            if c != '"' {
                i += 1;
                continue;
            }
            match closers[i + 1] {
                Some(close) => i = close + 1,
                None if unclosed == UnclosedQuote::Literal => i += 1,
                None => break,
            }
        }

        if i > start {
            let end = chars.get(i).map_or(line.len(), |&(pos, _)| pos);
            tokens.push(&line[chars[start].0..end]);
        } else {
            // Separator, or a quote that can never close.
            i += 1;
        }
    }

    tokens
}

fn is_separator(c: char) -> bool {
    is_space(c) || c == ','
}

/// Unicode `White_Space` plus the information separators U+001C..=U+001F,
/// which history tools treat as blanks too.
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// For every position `p`, the index of the quote that closes a span whose
/// body starts at `p`, if any.
///
/// An escape pair `\x` (x not a newline) is preferred; when that leaves the
/// span unclosed, the backslash is taken as a plain character instead.
fn quote_closers(chars: &[(usize, char)]) -> Vec<Option<usize>> {
    let n = chars.len();
    let mut closers = vec![None; n + 1];
    for pos in (0..n).rev() {
        let c = chars[pos].1;
        if c == '"' {
            closers[pos] = Some(pos);
            continue;
        }
        let escaped = if c == '\\' && pos + 1 < n && chars[pos + 1].1 != '\n' {
            closers[pos + 2]
        } else {
            None
        };
        closers[pos] = escaped.or(closers[pos + 1]);
    }
    closers
}
