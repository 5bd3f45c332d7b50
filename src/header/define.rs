//! `#define` parser
//!
//! Object-like and function-like macros keep their single-line body. A
//! multi-line macro whose first continued line starts with the X-macro
//! prefix (`_(` by default) is read as a table:
//!
//! ```text
//! #define OPCODES(_) \
//!     _(ADD, 2)      \
//!     _(NEG, 1)
//! ```
//!
//! yields `values: [["ADD", "2"], ["NEG", "1"]]`. Any other multi-line body
//! is skipped.

use super::char_class::CharSet;
use super::decl::{Declaration, MacroDecl};
use super::error::{HeaderError, HeaderResult};
use super::parser::{first_line, HeaderParser};
use super::scanner::{find_first_not_of, find_first_of, find_scope_borders, smart_split_by, Delimiter};
use memchr::memmem;

const NAME_END: CharSet = CharSet::new(b" \t\r\n({[");

fn ends_with_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// Parse one continued line of an X-macro table into its cells
pub fn parse_xmacro_row(line: &str, prefix: &str) -> Vec<String> {
    let mut row = line.trim_end();
    row = row.strip_suffix('\\').unwrap_or(row).trim();
    row = row.strip_prefix(prefix).unwrap_or(row);
    row = row.strip_suffix(')').unwrap_or(row);
    smart_split_by(row, b',').into_iter().map(str::to_string).collect()
}

impl HeaderParser<'_> {
    /// Parse `#define NAME[(args)] [body]`
    ///
    /// # Errors
    ///
    /// [`HeaderError::MissingKeyword`] without `#define` at or after `start`,
    /// [`HeaderError::MissingName`] when no name follows it.
    pub fn parse_define(&mut self, start: usize) -> HeaderResult<(usize, Declaration)> {
        const DIRECTIVE: &str = "#define";

        let text = self.text;
        let keyword = memmem::find(&text.as_bytes()[start..], DIRECTIVE.as_bytes())
            .map(|n| start + n)
            .ok_or(HeaderError::MissingKeyword {
                keyword: DIRECTIVE,
                position: start,
            })?;

        let name_start = find_first_not_of(b" \t", text, keyword + DIRECTIVE.len());
        let name_end = text.as_bytes()[name_start..]
            .iter()
            .position(|b| NAME_END.contains(*b))
            .map_or(text.len(), |n| name_start + n);
        if name_start == name_end {
            return Err(HeaderError::MissingName {
                construct: "macro",
                position: name_start,
            });
        }

        let mut decl = MacroDecl {
            name: text[name_start..name_end].to_string(),
            ..MacroDecl::default()
        };

        let mut pos = name_end;
        if text.as_bytes().get(pos) == Some(&b'(') {
            let params = find_scope_borders(text, pos, Delimiter::Paren)?;
            decl.arguments = Some(params.inner(text).to_string());
            pos = params.end();
        }

        let line_end = find_first_of(b"\n", text, pos);
        let line = &text[pos..line_end];
        if !ends_with_continuation(line) {
            let body = line.trim();
            if !body.is_empty() {
                decl.body = Some(body.to_string());
            }
            return Ok((line_end, Declaration::Macro(decl)));
        }

        let mut continued = Vec::new();
        let mut cursor = line_end;
        while cursor < text.len() {
            let next_end = find_first_of(b"\n", text, cursor + 1);
            let next_line = &text[cursor + 1..next_end];
            continued.push(next_line);
            cursor = next_end;
            if !ends_with_continuation(next_line) {
                break;
            }
        }

        let prefix = self.config.xmacro_prefix.as_str();
        let is_table = continued
            .first()
            .is_some_and(|first| first.trim_start().starts_with(prefix));
        if is_table {
            let rows: Vec<Vec<String>> = continued
                .iter()
                .map(|line| parse_xmacro_row(line, prefix))
                .filter(|row| !row.is_empty())
                .collect();
            decl.values = Some(rows);
        } else {
            self.diagnostics.debug(&format!(
                "Skipping multi-line body of macro {}: {}",
                decl.name,
                continued.first().map_or("", |line| first_line(line))
            ));
        }

        Ok((cursor, Declaration::Macro(decl)))
    }
}
