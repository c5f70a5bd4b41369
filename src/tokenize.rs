//! Path-data tokenizer.
//!
//! Splits raw path-data text into a flat stream of command letters and
//! numeric literals. Tokenization never fails: separators and junk bytes
//! are consumed by the grammar's `sep` rule, and text that parses as a
//! number but overflows `f64` is dropped.

use pest::Parser;
use pest_derive::Parser;

use crate::log::debug;

#[derive(Parser)]
#[grammar = "pathdata.pest"]
struct PathDataParser;

/// One token of the path-data mini-language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A single ASCII letter; case is significant (`M` vs `m`).
    Command(char),
    /// A numeric literal, including glued forms like `-7.87-0.021`
    /// (two tokens) and scientific notation like `1e-10` (one token).
    Number(f64),
}

/// Tokenize path data (or any number list) into commands and numbers.
pub fn tokenize(text: &str) -> Vec<Token> {
    // The grammar is total, but guard anyway rather than unwrap.
    let Ok(pairs) = PathDataParser::parse(Rule::tokens, text) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for pair in pairs {
        if pair.as_rule() != Rule::tokens {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::command => {
                    if let Some(c) = inner.as_str().chars().next() {
                        out.push(Token::Command(c));
                    }
                }
                Rule::number => {
                    if let Ok(value) = inner.as_str().parse::<f64>() {
                        out.push(Token::Number(value));
                    }
                }
                _ => {}
            }
        }
    }
    debug!("tokenized {} bytes into {} tokens", text.len(), out.len());
    out
}

/// The numeric tokens of `text`, in order, ignoring everything else.
/// Used for `viewBox` and `points` attribute values.
pub fn numbers(text: &str) -> Vec<f64> {
    tokenize(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::Number(value) => Some(value),
            Token::Command(_) => None,
        })
        .collect()
}
