//! Enum parser
//!
//! Handles `enum`, `enum class` and `enum struct`, with or without an
//! underlying type, as well as opaque declarations such as
//! `enum class Kind : uint8_t;`.

use super::char_class::{find_word, starts_with_word};
use super::class::{declared_name, find_single_colon, qualify};
use super::decl::{Declaration, EnumDecl, Enumerator};
use super::error::{HeaderError, HeaderResult};
use super::parser::HeaderParser;
use super::scanner::{
    find_first_not_of, find_first_of, find_scope_borders, smart_find_first_of, smart_split_by,
    Delimiter,
};

fn parse_enumerator(text: &str) -> Enumerator {
    let eq = find_first_of(b"=", text, 0);
    let value = (eq < text.len()).then(|| text[eq + 1..].trim().to_string());
    Enumerator {
        name: text[..eq].trim().to_string(),
        value,
    }
}

impl HeaderParser<'_> {
    /// Parse an enumeration; anonymous enums get the empty name
    pub fn parse_enum(
        &mut self,
        start: usize,
        parent: Option<&str>,
    ) -> HeaderResult<(usize, Declaration)> {
        let text = self.text;
        let keyword = find_word(text, start, "enum").ok_or(HeaderError::MissingKeyword {
            keyword: "enum",
            position: start,
        })?;

        let mut pos = find_first_not_of(b" \t\r\n", text, keyword + "enum".len());
        let scoped = starts_with_word(text, pos, "class") || starts_with_word(text, pos, "struct");
        if scoped {
            pos = find_first_of(b" \t\r\n", text, pos);
        }

        let stop = smart_find_first_of(b";{", text, pos);
        let head = &text[pos..stop];
        let (name_part, underlying) = match find_single_colon(head) {
            Some(colon) => (&head[..colon], Some(head[colon + 1..].trim().to_string())),
            None => (head, None),
        };
        let name = declared_name(name_part, self.config);
        let mut decl = EnumDecl {
            name: if name.is_empty() {
                String::new()
            } else {
                qualify(parent, name)
            },
            scoped,
            underlying: underlying.filter(|ty| !ty.is_empty()),
            values: None,
        };

        if stop >= text.len() || text.as_bytes()[stop] == b';' {
            self.diagnostics
                .debug(&format!("Opaque declaration of enum {}", decl.name));
            return Ok(((stop + 1).min(text.len()), Declaration::Enum(decl)));
        }

        let body = find_scope_borders(text, stop, Delimiter::Brace)?;
        decl.values = Some(
            smart_split_by(body.inner(text), b',')
                .into_iter()
                .map(parse_enumerator)
                .collect(),
        );
        Ok((self.consume_semicolon(body.end()), Declaration::Enum(decl)))
    }
}
