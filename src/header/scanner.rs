//! Text Scanner
//!
//! Stateless byte-offset utilities over raw header text. Nothing here
//! allocates a token stream; every function takes a start offset and returns
//! an offset. "Not found" is reported as the end bound (text length by
//! default), mirroring an index one past the end.
//!
//! The *smart* variants only see delimiters at the current nesting level:
//! anything inside `{}`, `()`, `<>`, `[]`, string or char literals opened
//! after the start offset is invisible to them.
//!
//! # Example
//!
//! ```rust
//! use headerscan::header::scanner::{smart_find_first_of, smart_split_by};
//!
//! assert_eq!(smart_find_first_of(b"d", "<a{b}c>d", 0), 7);
//! assert_eq!(smart_split_by("a(x;y);b;", b';'), vec!["a(x;y)", "b"]);
//! ```

use super::char_class::{is_ident_byte, CharSet};
use super::error::{HeaderError, HeaderResult};

/// The four bracket kinds the scanner balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `{ }`
    Brace,
    /// `( )`
    Paren,
    /// `< >`
    Angle,
    /// `[ ]`
    Bracket,
}

impl Delimiter {
    /// Opening byte
    #[inline]
    pub const fn open(self) -> u8 {
        match self {
            Delimiter::Brace => b'{',
            Delimiter::Paren => b'(',
            Delimiter::Angle => b'<',
            Delimiter::Bracket => b'[',
        }
    }

    /// Closing byte
    #[inline]
    pub const fn close(self) -> u8 {
        match self {
            Delimiter::Brace => b'}',
            Delimiter::Paren => b')',
            Delimiter::Angle => b'>',
            Delimiter::Bracket => b']',
        }
    }

    /// Delimiter kind opened by `b`, if any
    pub const fn from_open(b: u8) -> Option<Self> {
        match b {
            b'{' => Some(Delimiter::Brace),
            b'(' => Some(Delimiter::Paren),
            b'<' => Some(Delimiter::Angle),
            b'[' => Some(Delimiter::Bracket),
            _ => None,
        }
    }
}

/// A balanced bracketed region: offsets of the opening and closing delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeSpan {
    /// Offset of the opening delimiter
    pub open: usize,
    /// Offset of the matching closing delimiter
    pub close: usize,
}

impl ScopeSpan {
    /// Text strictly between the delimiters
    #[inline]
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.open + 1..self.close]
    }

    /// Offset just past the closing delimiter
    #[inline]
    pub fn end(&self) -> usize {
        self.close + 1
    }
}

/// Lowest offset `>= start` whose byte is in `chars`, or `text.len()`
#[inline]
pub fn find_first_of(chars: &[u8], text: &str, start: usize) -> usize {
    find_first_of_bounded(chars, text, start, text.len())
}

/// Lowest offset in `start..end` whose byte is in `chars`, or `end`
pub fn find_first_of_bounded(chars: &[u8], text: &str, start: usize, end: usize) -> usize {
    let end = end.min(text.len());
    if start >= end {
        return end;
    }

    let hay = &text.as_bytes()[start..end];
    let found = match chars {
        [] => None,
        [a] => memchr::memchr(*a, hay),
        [a, b] => memchr::memchr2(*a, *b, hay),
        [a, b, c] => memchr::memchr3(*a, *b, *c, hay),
        _ => {
            let set = CharSet::new(chars);
            hay.iter().position(|b| set.contains(*b))
        }
    };

    found.map_or(end, |i| start + i)
}

/// Lowest offset `>= start` whose byte is NOT in `chars`, or `text.len()`
pub fn find_first_not_of(chars: &[u8], text: &str, start: usize) -> usize {
    let set = CharSet::new(chars);
    let bytes = text.as_bytes();
    (start.min(bytes.len())..bytes.len())
        .find(|&i| !set.contains(bytes[i]))
        .unwrap_or(bytes.len())
}

/// Check whether a quote at `pos` opens a string or char literal
///
/// A `'` right after an alphanumeric byte is a digit separator (`1'000`).
#[inline]
pub fn is_literal_start(bytes: &[u8], pos: usize) -> bool {
    match bytes[pos] {
        b'"' => true,
        b'\'' => pos == 0 || !bytes[pos - 1].is_ascii_alphanumeric(),
        _ => false,
    }
}

/// Offset just past the string or char literal starting at `pos`
///
/// Escaped quotes are honoured and raw strings (`R"d(...)d"`) are skipped
/// whole. Char literals never span lines, so a stray apostrophe stops at the
/// line break. Unterminated literals run to the end of the text.
pub fn skip_literal(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    if quote == b'"' && pos > 0 && bytes[pos - 1] == b'R' {
        if let Some(end) = skip_raw_string(bytes, pos) {
            return end;
        }
    }

    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            b'\n' if quote == b'\'' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_raw_string(bytes: &[u8], pos: usize) -> Option<usize> {
    let paren = pos + 1 + memchr::memchr(b'(', &bytes[pos + 1..])?;
    let delim = &bytes[pos + 1..paren];
    let mut closing = Vec::with_capacity(delim.len() + 2);
    closing.push(b')');
    closing.extend_from_slice(delim);
    closing.push(b'"');
    let found = memchr::memmem::find(&bytes[paren + 1..], &closing)?;
    Some(paren + 1 + found + closing.len())
}

/// Offset just past the comment starting at `pos`, if one starts there
fn skip_comment(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes[pos] != b'/' {
        return None;
    }
    match bytes.get(pos + 1) {
        Some(b'/') => Some(memchr::memchr(b'\n', &bytes[pos..]).map_or(bytes.len(), |n| pos + n)),
        Some(b'*') => Some(
            memchr::memmem::find(&bytes[pos + 2..], b"*/").map_or(bytes.len(), |n| pos + 2 + n + 2),
        ),
        _ => None,
    }
}

/// Check whether the `<` at `pos` opens a template argument list
///
/// Shifts, `<=`, `operator<`, a `<` right after `)` or `]`, and spaced
/// comparisons (`a < b`) are not openers. A spaced `<` after an identifier
/// opens only when that identifier is `template`.
pub fn opens_angle(bytes: &[u8], pos: usize) -> bool {
    if matches!(bytes.get(pos + 1), Some(b'<') | Some(b'=')) {
        return false;
    }
    if pos == 0 {
        return true;
    }
    if bytes[pos - 1] == b'<' || bytes[..pos].ends_with(b"operator") {
        return false;
    }

    let mut j = pos;
    while j > 0 && matches!(bytes[j - 1], b' ' | b'\t' | b'\n' | b'\r') {
        j -= 1;
    }
    if j == 0 {
        return true;
    }
    match bytes[j - 1] {
        b')' | b']' => false,
        b if is_ident_byte(b) && j < pos => {
            bytes[..j].ends_with(b"template") && (j == 8 || !is_ident_byte(bytes[j - 9]))
        }
        _ => true,
    }
}

/// Check whether the `>` at `pos` closes a template argument list
#[inline]
fn closes_angle(bytes: &[u8], pos: usize) -> bool {
    !(pos > 0 && bytes[pos - 1] == b'-') && bytes.get(pos + 1) != Some(&b'=')
}

/// Pop the scope stack for a closing byte
///
/// A closer that does not match the innermost scope unwinds to its matching
/// opener when one is on the stack; a stray `>` is an operator and ignored.
fn unwind(stack: &mut Vec<u8>, close: u8) {
    match stack.last() {
        Some(&top) if top == close => {
            stack.pop();
        }
        _ if close != b'>' && stack.contains(&close) => {
            while let Some(top) = stack.pop() {
                if top == close {
                    break;
                }
            }
        }
        _ => {}
    }
}

/// Like [`find_first_of`], but only at the nesting level of `start`
///
/// Occurrences inside any `{}`, `()`, `<>`, `[]`, string literal or char
/// literal opened after `start` are ignored. A target byte at depth zero is
/// reported even when it is itself an opening delimiter.
pub fn smart_find_first_of(chars: &[u8], text: &str, start: usize) -> usize {
    let set = CharSet::new(chars);
    let bytes = text.as_bytes();
    let mut stack: Vec<u8> = Vec::new();
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        // `;` never sits inside template arguments; drop angles left open by a comparison
        if b == b';' {
            while stack.last() == Some(&b'>') {
                stack.pop();
            }
        }
        if stack.is_empty() && set.contains(b) {
            return i;
        }
        match b {
            b'"' | b'\'' if is_literal_start(bytes, i) => {
                i = skip_literal(bytes, i);
                continue;
            }
            b'{' => stack.push(b'}'),
            b'(' => stack.push(b')'),
            b'[' => stack.push(b']'),
            b'<' if opens_angle(bytes, i) => stack.push(b'>'),
            b'>' if !closes_angle(bytes, i) => {}
            b'}' | b')' | b']' | b'>' => unwind(&mut stack, b),
            _ => {}
        }
        i += 1;
    }

    bytes.len()
}

/// Find the balanced scope of `delimiter` starting at or after `start`
///
/// The first opening delimiter outside literals and comments is taken as the
/// scope's opener; depth is then counted until it returns to zero. String and
/// char literal bodies and comments never count.
///
/// # Errors
///
/// [`HeaderError::MalformedScope`] when no opener exists or the end of text
/// is reached before the scope closes.
pub fn find_scope_borders(text: &str, start: usize, delimiter: Delimiter) -> HeaderResult<ScopeSpan> {
    let bytes = text.as_bytes();
    let (open_byte, close_byte) = (delimiter.open(), delimiter.close());
    let malformed = |position| HeaderError::MalformedScope {
        delimiter: open_byte as char,
        position,
    };

    let mut i = start;
    let open = loop {
        if i >= bytes.len() {
            return Err(malformed(start));
        }
        if is_literal_start(bytes, i) {
            i = skip_literal(bytes, i);
            continue;
        }
        if let Some(next) = skip_comment(bytes, i) {
            i = next;
            continue;
        }
        if bytes[i] == open_byte {
            break i;
        }
        i += 1;
    };

    let mut depth = 1usize;
    i = open + 1;
    while i < bytes.len() {
        if is_literal_start(bytes, i) {
            i = skip_literal(bytes, i);
            continue;
        }
        if let Some(next) = skip_comment(bytes, i) {
            i = next;
            continue;
        }
        let b = bytes[i];
        if b == open_byte && (delimiter != Delimiter::Angle || opens_angle(bytes, i)) {
            depth += 1;
        } else if b == close_byte && (delimiter != Delimiter::Angle || closes_angle(bytes, i)) {
            depth -= 1;
            if depth == 0 {
                return Ok(ScopeSpan { open, close: i });
            }
        }
        i += 1;
    }

    Err(malformed(open))
}

/// Split `text` on top-level occurrences of `sep`
///
/// Separators inside nested scopes or literals are not split points. Pieces
/// are trimmed and empty pieces dropped.
pub fn smart_split_by(text: &str, sep: u8) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let next = smart_find_first_of(&[sep], text, pos);
        let piece = text[pos..next].trim();
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pos = next + 1;
    }

    pieces
}
