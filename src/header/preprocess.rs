//! Preprocessor Stage
//!
//! Produces comment-free, include-free text plus the ordered include list.
//! Line breaks ending `//` comments are kept, so macro continuations and
//! line-oriented directives survive; exact line numbers are not preserved
//! once block comments spanning lines are removed.

use super::diagnostics::Diagnostics;
use super::error::{HeaderError, HeaderResult};
use super::scanner::{find_first_of, is_literal_start, skip_literal};
use memchr::memmem;

/// Header text after the preprocessor stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    /// Comment- and include-free text
    pub text: String,
    /// `#include` targets, delimiters included, in source order
    pub includes: Vec<String>,
}

/// Strip comments, then extract includes
pub fn preprocess(text: &str, diagnostics: &dyn Diagnostics) -> HeaderResult<Preprocessed> {
    let without_comments = remove_comments(text, diagnostics)?;
    let (text, includes) = extract_and_remove_includes(&without_comments)?;
    Ok(Preprocessed { text, includes })
}

/// Remove `//` and `/* */` comments
///
/// Comment markers inside string and char literals are left alone. A block
/// comment is replaced by one space so the tokens around it stay apart. The
/// result is trimmed, and applying the function again changes nothing.
///
/// # Errors
///
/// [`HeaderError::UnterminatedComment`] for a `/*` without `*/`.
pub fn remove_comments(text: &str, diagnostics: &dyn Diagnostics) -> HeaderResult<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'"' | b'\'', _) if is_literal_start(bytes, i) => {
                i = skip_literal(bytes, i);
            }
            (b'/', Some(b'/')) => {
                out.push_str(&text[copied..i]);
                match memchr::memchr(b'\n', &bytes[i..]) {
                    Some(n) => i += n,
                    None => {
                        diagnostics.warning(&format!(
                            "Single-line comment at byte {} runs to end of file",
                            i
                        ));
                        i = bytes.len();
                    }
                }
                copied = i;
            }
            (b'/', Some(b'*')) => {
                out.push_str(&text[copied..i]);
                let close = memmem::find(&bytes[i + 2..], b"*/")
                    .ok_or(HeaderError::UnterminatedComment { position: i })?;
                i += 2 + close + 2;
                out.push(' ');
                copied = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&text[copied..]);

    Ok(out.trim().to_string())
}

/// Extract `#include` directives
///
/// Each directive is removed from `#include` through its closing `>` or `"`;
/// the delimited target is recorded verbatim. Returns the trimmed remaining
/// text and the targets in source order.
///
/// # Errors
///
/// [`HeaderError::UnterminatedInclude`] when the target's delimiter is missing
/// or never closes.
pub fn extract_and_remove_includes(text: &str) -> HeaderResult<(String, Vec<String>)> {
    const DIRECTIVE: &str = "#include";

    let bytes = text.as_bytes();
    let finder = memmem::Finder::new(DIRECTIVE);
    let mut out = String::with_capacity(text.len());
    let mut includes = Vec::new();
    let mut copied = 0;

    while let Some(found) = finder.find(&bytes[copied..]).map(|n| copied + n) {
        let unterminated = HeaderError::UnterminatedInclude { position: found };

        let open = find_first_of(b"<\"", text, found + DIRECTIVE.len());
        if open >= bytes.len() {
            return Err(unterminated);
        }
        let close_byte = if bytes[open] == b'<' { b'>' } else { b'"' };
        let close = find_first_of(&[close_byte], text, open + 1);
        if close >= bytes.len() {
            return Err(unterminated);
        }

        includes.push(text[open..=close].to_string());
        out.push_str(&text[copied..found]);
        copied = close + 1;
    }
    out.push_str(&text[copied..]);

    Ok((out.trim().to_string(), includes))
}
