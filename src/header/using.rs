//! Using-declaration, alias and namespace-alias parser

use super::char_class::{find_word, starts_with_word};
use super::decl::{AliasDecl, AliasKind, Declaration};
use super::error::{HeaderError, HeaderResult};
use super::parser::HeaderParser;
use super::scanner::{find_first_not_of, find_first_of, smart_find_first_of};
use super::types::parse_type;

impl HeaderParser<'_> {
    /// Parse a `using` form or `namespace X = Y;`
    ///
    /// Whichever of `using` and `namespace` comes first after `start` selects
    /// the form. The right-hand side is a type expression stored under
    /// `type`; `using ns::Name;` and `using namespace ns;` have none.
    pub fn parse_using(
        &mut self,
        start: usize,
        template: Option<String>,
    ) -> HeaderResult<(usize, Declaration)> {
        let text = self.text;
        let using = find_word(text, start, "using");
        let namespace = find_word(text, start, "namespace");
        let (keyword, is_using) = match (using, namespace) {
            (Some(u), Some(n)) if n < u => (n, false),
            (Some(u), _) => (u, true),
            (None, Some(n)) => (n, false),
            (None, None) => {
                return Err(HeaderError::MissingKeyword {
                    keyword: "using",
                    position: start,
                })
            }
        };

        let semi = smart_find_first_of(b";", text, keyword);
        let next = (semi + 1).min(text.len());
        let mut body_start = keyword + if is_using { "using".len() } else { "namespace".len() };
        let mut kind = if is_using { AliasKind::Using } else { AliasKind::Namespace };

        if is_using {
            let after = find_first_not_of(b" \t\r\n", text, body_start);
            if after < semi && starts_with_word(text, after, "namespace") {
                kind = AliasKind::UsingNamespace;
                body_start = after + "namespace".len();
            }
        }

        let body = &text[body_start..semi];
        let name_end = find_first_of(b"=;\n", body, 0);
        let name = body[..name_end].trim();
        if name.is_empty() {
            return Err(HeaderError::MissingName {
                construct: "using",
                position: body_start,
            });
        }

        let ty = if name_end < body.len() && body.as_bytes()[name_end] == b'=' {
            if kind == AliasKind::Using {
                kind = AliasKind::Type;
            }
            Some(parse_type(&body[name_end + 1..], self.config))
        } else {
            None
        };

        let decl = AliasDecl {
            name: name.to_string(),
            kind,
            template,
            ty,
        };
        Ok((next, Declaration::Alias(decl)))
    }
}
