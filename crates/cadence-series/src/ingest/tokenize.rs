//! Line tokenizing and token classification.
//!
//! A token is any maximal run of characters that are neither whitespace
//! nor a configured separator. Tokens are then classified by shape as a
//! decimal number or a compact ISO-8601 datetime.

use cadence_core::timestamp::is_compact_iso;
use smallvec::SmallVec;

use crate::config::IngestConfig;

/// Tokens of one line. Forcing files rarely exceed a dozen columns.
pub(crate) type LineTokens<'a> = SmallVec<[&'a str; 16]>;

/// Split `line` into tokens according to `config`.
pub(crate) fn tokenize<'a>(line: &'a str, config: &IngestConfig) -> LineTokens<'a> {
    line.split(|c| config.is_separator(c))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Shape of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `[-+]?(digits[.digits*]? | .digits)([eE][-+]?digits)?`
    Number,
    /// `YYYYMMDDThhmmss`
    DateTime,
    /// Neither.
    Unknown,
}

/// Classify a token. Datetime shape is checked first so that a bare
/// 15-character timestamp is never mistaken for anything else.
pub(crate) fn classify(token: &str) -> TokenKind {
    if is_compact_iso(token) {
        TokenKind::DateTime
    } else if is_decimal(token) {
        TokenKind::Number
    } else {
        TokenKind::Unknown
    }
}

/// Hand-rolled scanner for the decimal pattern.
///
/// Accepts `1`, `1.`, `1.5`, `.5`, `-2.5e-3`, `+4E2`; rejects `.`, `e5`,
/// `1e`, `1.2.3`, `nan`, `inf`.
fn is_decimal(token: &str) -> bool {
    let b = token.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < b.len() && matches!(b[i], b'e' | b'E') {
        i += 1;
        if i < b.len() && matches!(b[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == b.len()
}
