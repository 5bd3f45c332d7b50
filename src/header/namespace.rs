//! Namespace parser

use super::char_class::find_word;
use super::decl::{Declaration, NamespaceDecl};
use super::error::{HeaderError, HeaderResult};
use super::parser::HeaderParser;
use super::scanner::{find_first_of, find_scope_borders, Delimiter};

impl HeaderParser<'_> {
    /// Parse `namespace name { ... }`
    ///
    /// Only the innermost segment of `a::b::c` is kept as the name, and an
    /// anonymous namespace gets the empty name. The body goes back through
    /// the dispatch driver.
    pub fn parse_namespace(&mut self, start: usize) -> HeaderResult<(usize, Declaration)> {
        let text = self.text;
        let keyword = find_word(text, start, "namespace").ok_or(HeaderError::MissingKeyword {
            keyword: "namespace",
            position: start,
        })?;
        let after_keyword = keyword + "namespace".len();

        let brace = find_first_of(b"{;", text, after_keyword);
        if brace >= text.len() || text.as_bytes()[brace] != b'{' {
            return Err(HeaderError::MalformedScope {
                delimiter: '{',
                position: keyword,
            });
        }

        let name = text[after_keyword..brace]
            .rsplit("::")
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        let body = find_scope_borders(text, brace, Delimiter::Brace)?;
        let declarations =
            self.nested(|parser| parser.parse_declarations(body.open + 1, body.close))?;

        Ok((body.end(), Declaration::Namespace(NamespaceDecl { name, declarations })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::config::ScraperConfig;
    use crate::header::diagnostics::NullDiagnostics;

    fn parse_namespace(text: &str) -> (usize, NamespaceDecl) {
        let config = ScraperConfig::default();
        let mut parser = HeaderParser::new(text, &config, &NullDiagnostics);
        match parser.parse_namespace(0).unwrap() {
            (end, Declaration::Namespace(ns)) => (end, ns),
            (_, other) => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_namespace_body() {
        let (end, ns) = parse_namespace("namespace ark {\nclass Runtime;\nstruct Frame;\n}\nint x;");
        assert_eq!(ns.name, "ark");
        assert_eq!(ns.declarations.names(), vec!["Runtime", "Frame"]);
        assert_eq!(end, 46);
    }

    #[test]
    fn test_nested_namespace_name_is_innermost() {
        let (_, ns) = parse_namespace("namespace ark::mem::gc { struct Region; }");
        assert_eq!(ns.name, "gc");
    }

    #[test]
    fn test_anonymous_namespace() {
        let (_, ns) = parse_namespace("namespace { constexpr int K = 1; }");
        assert_eq!(ns.name, "");
        assert!(ns.declarations.is_empty());
    }

    #[test]
    fn test_namespace_recurses() {
        let (_, ns) = parse_namespace("namespace a { namespace b { class C; } }");
        match ns.declarations.get("b") {
            Some(Declaration::Namespace(inner)) => assert_eq!(inner.declarations.names(), vec!["C"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_namespace_without_body() {
        let config = ScraperConfig::default();
        let mut parser = HeaderParser::new("namespace broken;", &config, &NullDiagnostics);
        assert!(matches!(
            parser.parse_namespace(0),
            Err(HeaderError::MalformedScope { delimiter: '{', position: 0 })
        ));
    }
}
