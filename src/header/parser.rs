//! Dispatch Driver
//!
//! [`HeaderParser`] walks preprocessed header text left to right and hands
//! each construct to its parser. The construct parsers live in sibling
//! modules as further `impl HeaderParser` blocks, so a class body can recurse
//! into the struct parser and a namespace body back into this driver without
//! any callback plumbing.
//!
//! # Example
//!
//! ```rust
//! use headerscan::header::{parse_header, NullDiagnostics, ScraperConfig};
//!
//! let file = parse_header(
//!     "#include <cstdint>\nnamespace ark { class Foo : public Bar { int x; }; }",
//!     &ScraperConfig::default(),
//!     &NullDiagnostics,
//! )
//! .unwrap();
//! assert_eq!(file.includes, vec!["<cstdint>"]);
//! assert_eq!(file.declarations.names(), vec!["ark"]);
//! ```

use super::char_class::starts_with_word;
use super::config::ScraperConfig;
use super::decl::Member;
use super::diagnostics::Diagnostics;
use super::error::{HeaderError, HeaderResult};
use super::method::{is_known_macro_call, parse_method};
use super::preprocess::preprocess;
use super::scanner::{
    find_first_not_of, find_first_of_bounded, find_scope_borders, smart_find_first_of, Delimiter,
};
use super::tree::DeclarationTree;
use super::types::parse_fields;
use serde::Serialize;

const SPACE: &[u8] = b" \t\r\n";

const ACCESS_LABELS: &[&str] = &["public", "protected", "private"];

/// Result of scraping one header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderFile {
    /// `#include` targets in source order, delimiters included
    pub includes: Vec<String>,
    /// Top-level declarations
    pub declarations: DeclarationTree,
}

impl HeaderFile {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Scrape one header: preprocess it, then parse every declaration
pub fn parse_header(
    text: &str,
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
) -> HeaderResult<HeaderFile> {
    let cleaned = preprocess(text, diagnostics)?;
    let mut parser = HeaderParser::new(&cleaned.text, config, diagnostics);
    let declarations = parser.parse()?;
    Ok(HeaderFile {
        includes: cleaned.includes,
        declarations,
    })
}

/// Parser over preprocessed header text
///
/// Every construct parser takes a start offset and returns the offset just
/// past what it consumed together with the parsed value.
pub struct HeaderParser<'a> {
    pub(super) text: &'a str,
    pub(super) config: &'a ScraperConfig,
    pub(super) diagnostics: &'a dyn Diagnostics,
    depth: usize,
}

impl<'a> HeaderParser<'a> {
    /// Create a parser over comment- and include-free text
    pub fn new(text: &'a str, config: &'a ScraperConfig, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            text,
            config,
            diagnostics,
            depth: 0,
        }
    }

    /// Parse the whole text
    pub fn parse(&mut self) -> HeaderResult<DeclarationTree> {
        self.parse_declarations(0, self.text.len())
    }

    /// Current nesting depth of class/struct/namespace bodies
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run `f` one nesting level deeper
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> HeaderResult<T>,
    ) -> HeaderResult<T> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(HeaderError::NestingTooDeep {
                depth: self.depth + 1,
                max_depth: self.config.max_nesting_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// First non-whitespace offset at or after `pos`, capped at `end`
    #[inline]
    pub(super) fn skip_space(&self, pos: usize, end: usize) -> usize {
        find_first_not_of(SPACE, self.text, pos).min(end)
    }

    /// Offset just past a `;` directly following `pos`, or `pos`
    pub(super) fn consume_semicolon(&self, pos: usize) -> usize {
        let next = find_first_not_of(SPACE, self.text, pos);
        if self.text.as_bytes().get(next) == Some(&b';') {
            next + 1
        } else {
            pos
        }
    }

    /// Extent of the statement starting at `start`
    ///
    /// A statement ends at a top-level `;` or with a braced body. Returns the
    /// end of the statement text (`;` excluded) and the offset to resume at.
    pub(super) fn statement_extent(&self, start: usize, end: usize) -> HeaderResult<(usize, usize)> {
        let region = &self.text[..end];
        let bytes = region.as_bytes();
        let mut pos = start;

        loop {
            let found = smart_find_first_of(b";{", region, pos);
            if found >= end {
                return Ok((end, end));
            }
            if bytes[found] == b';' {
                return Ok((found, found + 1));
            }

            let span = find_scope_borders(region, found, Delimiter::Brace)?;
            let after = find_first_not_of(SPACE, region, span.end());
            match bytes.get(after) {
                Some(b';') => return Ok((span.end(), after + 1)),
                // `Foo() : a_{1}, b_{2} {}` continues past the initializer braces
                Some(b',' | b'{') if has_ctor_initializer(&region[start..found]) => pos = after,
                _ => return Ok((span.end(), span.end())),
            }
        }
    }

    /// Skip a preprocessor directive, following `\` continuations
    pub(super) fn skip_directive(&self, start: usize, end: usize) -> usize {
        let mut pos = start;
        loop {
            let newline = find_first_of_bounded(b"\n", self.text, pos, end);
            if newline >= end {
                return end;
            }
            if !self.text[pos..newline].trim_end().ends_with('\\') {
                return newline + 1;
            }
            pos = newline + 1;
        }
    }

    /// Dispatch every declaration in `start..end`
    ///
    /// Constructs the scraper has no model for (free functions, variables,
    /// `typedef`, `static_assert`) are skipped one statement at a time.
    pub fn parse_declarations(&mut self, start: usize, end: usize) -> HeaderResult<DeclarationTree> {
        let text = self.text;
        let mut tree = DeclarationTree::new();
        let mut template: Option<String> = None;
        let mut pos = start;

        loop {
            pos = self.skip_space(pos, end);
            if pos >= end {
                break;
            }
            let rest = &text[pos..end];

            if rest.starts_with("#define") {
                let (next, decl) = self.parse_define(pos)?;
                tree.insert(decl);
                pos = next;
            } else if rest.starts_with('#') {
                let next = self.skip_directive(pos, end);
                self.diagnostics
                    .debug(&format!("Skipping directive: {}", first_line(&text[pos..next])));
                pos = next;
            } else if starts_with_word(text, pos, "template") {
                let (next, params) = self.parse_template_prefix(pos)?;
                template = Some(params);
                pos = next;
                continue;
            } else if starts_with_word(text, pos, "namespace") && self.is_namespace_alias(pos, end) {
                let (next, decl) = self.parse_using(pos, None)?;
                tree.insert(decl);
                pos = next;
            } else if starts_with_word(text, pos, "namespace") || self.is_inline_namespace(pos) {
                let (next, decl) = self.parse_namespace(pos)?;
                tree.insert(decl);
                pos = next;
            } else if starts_with_word(text, pos, "using") {
                let (next, decl) = self.parse_using(pos, template.take())?;
                tree.insert(decl);
                pos = next;
            } else if starts_with_word(text, pos, "enum") {
                let (next, decl) = self.parse_enum(pos, None)?;
                tree.insert(decl);
                pos = next;
            } else if starts_with_word(text, pos, "class") {
                let (next, decl) = self.parse_class(pos, None, template.take())?;
                tree.insert(decl);
                pos = next;
            } else if starts_with_word(text, pos, "struct") {
                let (next, decl) = self.parse_struct(pos, None, template.take())?;
                tree.insert(decl);
                pos = next;
            } else if let Some(brace) = self.extern_c_block(pos, end) {
                let span = find_scope_borders(text, brace, Delimiter::Brace)?;
                let inner = self.parse_declarations(span.open + 1, span.close)?;
                tree.extend(inner);
                pos = span.end();
            } else {
                let (stmt_end, next) = self.statement_extent(pos, end)?;
                if template.is_some() {
                    self.diagnostics.debug(&format!(
                        "Skipping function template: {}",
                        first_line(&text[pos..stmt_end])
                    ));
                } else {
                    self.diagnostics
                        .debug(&format!("Skipping statement: {}", first_line(&text[pos..stmt_end])));
                }
                pos = next;
            }
            template = None;
        }

        Ok(tree)
    }

    /// Parse the members of a class or struct body in `start..end`
    ///
    /// Returns the members in source order and the names of friend classes.
    /// Nested type names are qualified with `parent`.
    pub fn parse_members(
        &mut self,
        start: usize,
        end: usize,
        parent: &str,
    ) -> HeaderResult<(Vec<Member>, Vec<String>)> {
        let text = self.text;
        let mut members = Vec::new();
        let mut friends = Vec::new();
        let mut template: Option<String> = None;
        let mut pos = start;

        loop {
            pos = self.skip_space(pos, end);
            if pos >= end {
                break;
            }
            let rest = &text[pos..end];

            if let Some(next) = self.access_label(pos, end) {
                pos = next;
                continue;
            }

            if rest.starts_with("#define") {
                let (next, decl) = self.parse_define(pos)?;
                members.push(Member::Nested(decl));
                pos = next;
            } else if rest.starts_with('#') {
                pos = self.skip_directive(pos, end);
            } else if starts_with_word(text, pos, "template") {
                let (next, params) = self.parse_template_prefix(pos)?;
                template = Some(params);
                pos = next;
                continue;
            } else if starts_with_word(text, pos, "friend") && self.is_friend_class(pos) {
                let (next, name) = self.parse_friend(pos)?;
                friends.push(name);
                pos = next;
            } else if starts_with_word(text, pos, "using") {
                let (next, decl) = self.parse_using(pos, template.take())?;
                members.push(Member::Nested(decl));
                pos = next;
            } else if starts_with_word(text, pos, "enum") {
                let (next, decl) = self.parse_enum(pos, Some(parent))?;
                members.push(Member::Nested(decl));
                pos = next;
            } else if starts_with_word(text, pos, "class") {
                let (next, decl) = self.parse_class(pos, Some(parent), template.take())?;
                members.push(Member::Nested(decl));
                pos = next;
            } else if starts_with_word(text, pos, "struct") {
                let (next, decl) = self.parse_struct(pos, Some(parent), template.take())?;
                members.push(Member::Nested(decl));
                pos = next;
            } else {
                let (stmt_end, next) = self.statement_extent(pos, end)?;
                self.push_member_statement(&text[pos..stmt_end], &mut members);
                pos = next;
            }
            template = None;
        }

        Ok((members, friends))
    }

    /// Turn one member statement into a method or fields
    fn push_member_statement(&self, statement: &str, members: &mut Vec<Member>) {
        let statement = statement.trim();
        if statement.is_empty() {
            return;
        }
        if is_known_macro_call(statement, self.config)
            || starts_with_word(statement, 0, "static_assert")
            || starts_with_word(statement, 0, "friend")
        {
            self.diagnostics
                .debug(&format!("Skipping member statement: {}", first_line(statement)));
            return;
        }
        if starts_with_word(statement, 0, "typedef") {
            self.diagnostics
                .debug(&format!("Skipping typedef: {}", first_line(statement)));
            return;
        }

        match parse_method(statement, self.config) {
            Some(method) => members.push(Member::Method(method)),
            None => members.extend(
                parse_fields(statement, self.config)
                    .into_iter()
                    .filter(|field| !field.ty.name.is_empty())
                    .map(Member::Field),
            ),
        }
    }

    /// Offset past `public:` / `protected:` / `private:` at `pos`
    fn access_label(&self, pos: usize, end: usize) -> Option<usize> {
        let text = self.text;
        let label = ACCESS_LABELS
            .iter()
            .find(|label| starts_with_word(text, pos, label))?;
        let colon = self.skip_space(pos + label.len(), end);
        let bytes = text.as_bytes();
        (colon < end && bytes[colon] == b':' && bytes.get(colon + 1) != Some(&b':')).then_some(colon + 1)
    }

    /// `namespace X = Y;` rather than a namespace body
    fn is_namespace_alias(&self, pos: usize, end: usize) -> bool {
        let stop = find_first_of_bounded(b"={;", self.text, pos, end);
        stop < end && self.text.as_bytes()[stop] == b'='
    }

    fn is_inline_namespace(&self, pos: usize) -> bool {
        starts_with_word(self.text, pos, "inline") && {
            let next = find_first_not_of(SPACE, self.text, pos + "inline".len());
            starts_with_word(self.text, next, "namespace")
        }
    }

    /// `friend class X;` / `friend struct X;` as opposed to a friend function
    fn is_friend_class(&self, pos: usize) -> bool {
        let next = find_first_not_of(SPACE, self.text, pos + "friend".len());
        starts_with_word(self.text, next, "class") || starts_with_word(self.text, next, "struct")
    }

    /// Offset of the `{` of an `extern "C" {` block at `pos`
    fn extern_c_block(&self, pos: usize, end: usize) -> Option<usize> {
        let text = self.text;
        if !starts_with_word(text, pos, "extern") {
            return None;
        }
        let lang = find_first_not_of(SPACE, text, pos + "extern".len());
        if !text[lang.min(end)..end].starts_with("\"C\"") {
            return None;
        }
        let brace = find_first_not_of(SPACE, text, lang + 3);
        (brace < end && text.as_bytes()[brace] == b'{').then_some(brace)
    }
}

/// Whether a member statement prefix has a constructor initializer list
fn has_ctor_initializer(prefix: &str) -> bool {
    let paren = smart_find_first_of(b"(", prefix, 0);
    let Ok(args) = find_scope_borders(prefix, paren, Delimiter::Paren) else {
        return false;
    };
    let bytes = prefix.as_bytes();
    let mut i = args.end();
    while i < bytes.len() {
        if bytes[i] == b':' {
            if bytes.get(i + 1) == Some(&b':') {
                i += 2;
                continue;
            }
            return true;
        }
        i += 1;
    }
    false
}

/// First line of `text`, trimmed, for log messages
pub(super) fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::diagnostics::{CollectingDiagnostics, NullDiagnostics, Severity};

    fn parse(text: &str) -> DeclarationTree {
        HeaderParser::new(text, &ScraperConfig::default(), &NullDiagnostics)
            .parse()
            .unwrap()
    }

    #[test]
    fn test_dispatch_order_preserved() {
        let tree = parse("#define A 1\nclass B;\nstruct C;\nusing D = int;\nenum E { X };");
        assert_eq!(tree.names(), vec!["A", "B", "C", "D", "E"]);
        let kinds: Vec<_> = tree.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec!["macro", "class", "struct", "alias", "enum"]);
    }

    #[test]
    fn test_skips_functions_and_variables() {
        let diag = CollectingDiagnostics::new();
        let config = ScraperConfig::default();
        let text = "inline int Twice(int x) { return x * 2; }\nconstexpr int K = 3;\nstruct S;";
        let tree = HeaderParser::new(text, &config, &diag).parse().unwrap();
        assert_eq!(tree.names(), vec!["S"]);
        assert_eq!(
            diag.messages(Severity::Debug)
                .iter()
                .filter(|m| m.starts_with("Skipping statement"))
                .count(),
            2
        );
    }

    #[test]
    fn test_skips_directives_with_continuations() {
        let tree = parse("#ifndef GUARD\n#pragma once\n#if A && \\\n B\nstruct S;\n#endif");
        assert_eq!(tree.names(), vec!["S"]);
    }

    #[test]
    fn test_function_template_skipped() {
        let tree = parse("template <typename T>\nT Max(T a, T b) { return a > b ? a : b; }\nclass C;");
        assert_eq!(tree.names(), vec!["C"]);
    }

    #[test]
    fn test_extern_c_block_is_transparent() {
        let tree = parse("extern \"C\" {\nstruct Handle;\n#define API 1\n}\nclass After;");
        assert_eq!(tree.names(), vec!["Handle", "API", "After"]);
    }

    #[test]
    fn test_inline_namespace_and_alias() {
        let tree = parse("inline namespace v1 { struct S; }\nnamespace fs = std::filesystem;");
        assert_eq!(tree.names(), vec!["v1", "fs"]);
        assert_eq!(tree.get("fs").map(|d| d.kind()), Some("alias"));
    }

    #[test]
    fn test_members_access_labels_and_friends() {
        let text = "public:\n  int x;\nprotected:\n  friend class Builder;\n  void Run() const;\nprivate:\n  NO_COPY_SEMANTIC(Foo);\n";
        let config = ScraperConfig::default();
        let mut parser = HeaderParser::new(text, &config, &NullDiagnostics);
        let (members, friends) = parser.parse_members(0, text.len(), "Foo").unwrap();
        assert_eq!(friends, vec!["Builder"]);
        assert_eq!(members.len(), 2);
        assert!(matches!(&members[0], Member::Field(f) if f.name == "x"));
        assert!(matches!(&members[1], Member::Method(m) if m.name == "Run"));
    }

    #[test]
    fn test_members_inline_definitions() {
        let text = "Foo() : a_(1), b_{2} {}\nint Get() const { return a_; }\nint a_ {0};\nint b_;";
        let config = ScraperConfig::default();
        let mut parser = HeaderParser::new(text, &config, &NullDiagnostics);
        let (members, _) = parser.parse_members(0, text.len(), "Foo").unwrap();
        let names: Vec<_> = members
            .iter()
            .map(|m| match m {
                Member::Field(f) => f.name.clone(),
                Member::Method(m) => m.name.clone(),
                Member::Nested(d) => d.name().to_string(),
            })
            .collect();
        assert_eq!(names, vec!["Foo", "Get", "a_", "b_"]);
    }

    #[test]
    fn test_nesting_limit() {
        let config = ScraperConfig::default().with_max_nesting_depth(2);
        let text = "namespace a { namespace b { namespace c { } } }";
        let err = HeaderParser::new(text, &config, &NullDiagnostics)
            .parse()
            .unwrap_err();
        assert_eq!(
            err,
            HeaderError::NestingTooDeep {
                depth: 3,
                max_depth: 2
            }
        );
    }

    #[test]
    fn test_parse_header_end_to_end() {
        let text = "// Copyright\n#include \"base.h\"\n/* doc */\nstruct Opaque;\n";
        let file = parse_header(text, &ScraperConfig::default(), &NullDiagnostics).unwrap();
        assert_eq!(file.includes, vec!["\"base.h\""]);
        let json: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
        assert_eq!(
            json["declarations"]["Opaque"],
            serde_json::json!({"kind": "struct", "name": "Opaque"})
        );
    }
}
