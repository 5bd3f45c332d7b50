//! Class parser, with the template prefix and friend helpers it relies on

use super::char_class::{find_word, starts_with_word};
use super::config::ScraperConfig;
use super::decl::{ClassDecl, Declaration};
use super::error::{HeaderError, HeaderResult};
use super::parser::HeaderParser;
use super::scanner::{find_first_not_of, find_scope_borders, smart_find_first_of, Delimiter};

/// Offset of the first single `:` in `text`, skipping `::` and nested scopes
pub(super) fn find_single_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    loop {
        let colon = smart_find_first_of(b":", text, pos);
        if colon >= bytes.len() {
            return None;
        }
        if bytes.get(colon + 1) == Some(&b':') {
            pos = colon + 2;
            continue;
        }
        return Some(colon);
    }
}

/// Whether a word in a declaration head is decoration rather than a name
fn is_decoration(word: &str, config: &ScraperConfig) -> bool {
    word == "final" || word.starts_with("[[") || word.starts_with("alignas(") || config.is_known_macro(word)
}

/// Declared name in a class or struct head such as `PANDA_PUBLIC_API Foo final`
pub(super) fn declared_name<'t>(head: &'t str, config: &ScraperConfig) -> &'t str {
    head.split_ascii_whitespace()
        .filter(|word| !is_decoration(word, config))
        .last()
        .unwrap_or("")
}

/// Qualify `name` with an enclosing class
pub(super) fn qualify(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{}::{}", parent, name),
        _ => name.to_string(),
    }
}

impl HeaderParser<'_> {
    /// Parse `class Name [final] [: bases] { ... };` or `class Name;`
    ///
    /// # Errors
    ///
    /// [`HeaderError::MissingKeyword`] when there is no `class` at or after
    /// `start`, [`HeaderError::MissingName`] for an unnamed class, and
    /// [`HeaderError::MalformedScope`] for an unbalanced body.
    pub fn parse_class(
        &mut self,
        start: usize,
        parent: Option<&str>,
        template: Option<String>,
    ) -> HeaderResult<(usize, Declaration)> {
        let text = self.text;
        let keyword = find_word(text, start, "class").ok_or(HeaderError::MissingKeyword {
            keyword: "class",
            position: start,
        })?;
        let after_keyword = keyword + "class".len();

        let stop = smart_find_first_of(b";{", text, after_keyword);
        if stop >= text.len() {
            return Err(HeaderError::MalformedScope {
                delimiter: '{',
                position: keyword,
            });
        }

        if text.as_bytes()[stop] == b';' {
            let head = &text[after_keyword..stop];
            let head = find_single_colon(head).map_or(head, |colon| &head[..colon]);
            let name = declared_name(head, self.config);
            if name.is_empty() {
                return Err(HeaderError::MissingName {
                    construct: "class",
                    position: after_keyword,
                });
            }
            self.diagnostics
                .debug(&format!("Forward declaration of class {}", name));
            let decl = ClassDecl {
                name: qualify(parent, name),
                template,
                ..ClassDecl::default()
            };
            return Ok((stop + 1, Declaration::Class(decl)));
        }

        let body = find_scope_borders(text, stop, Delimiter::Brace)?;
        let head = &text[after_keyword..body.open];
        let (name_part, extends) = match find_single_colon(head) {
            Some(colon) => (&head[..colon], Some(head[colon + 1..].trim().to_string())),
            None => (head, None),
        };

        let name = declared_name(name_part, self.config);
        if name.is_empty() {
            return Err(HeaderError::MissingName {
                construct: "class",
                position: after_keyword,
            });
        }
        let name = qualify(parent, name);

        let (members, friends) =
            self.nested(|parser| parser.parse_members(body.open + 1, body.close, &name))?;

        let decl = ClassDecl {
            name,
            template,
            extends: extends.filter(|bases| !bases.is_empty()),
            members: Some(members),
            friends,
        };
        Ok((self.consume_semicolon(body.end()), Declaration::Class(decl)))
    }

    /// Parse `template <...>` and return the raw parameter text
    ///
    /// # Errors
    ///
    /// [`HeaderError::MissingKeyword`] unless the text at `start` (after
    /// whitespace) begins with `template`.
    pub fn parse_template_prefix(&self, start: usize) -> HeaderResult<(usize, String)> {
        let text = self.text;
        let pos = find_first_not_of(b" \t\r\n", text, start);
        if !starts_with_word(text, pos, "template") {
            return Err(HeaderError::MissingKeyword {
                keyword: "template",
                position: start,
            });
        }

        let params = find_scope_borders(text, pos + "template".len(), Delimiter::Angle)?;
        Ok((params.end(), params.inner(text).trim().to_string()))
    }

    /// Parse `friend class X;` or `friend struct X;` and return `X`
    pub fn parse_friend(&self, start: usize) -> HeaderResult<(usize, String)> {
        let text = self.text;
        let pos = find_first_not_of(b" \t\r\n", text, start);
        if !starts_with_word(text, pos, "friend") {
            return Err(HeaderError::MissingKeyword {
                keyword: "friend",
                position: start,
            });
        }

        let kind = find_first_not_of(b" \t\r\n", text, pos + "friend".len());
        let after_kind = if starts_with_word(text, kind, "class") {
            kind + "class".len()
        } else if starts_with_word(text, kind, "struct") {
            kind + "struct".len()
        } else {
            return Err(HeaderError::MissingKeyword {
                keyword: "class",
                position: kind,
            });
        };

        let semi = smart_find_first_of(b";", text, after_kind);
        let name = text[after_kind..semi].trim();
        if name.is_empty() {
            return Err(HeaderError::MissingName {
                construct: "friend",
                position: after_kind,
            });
        }
        Ok(((semi + 1).min(text.len()), name.to_string()))
    }
}
