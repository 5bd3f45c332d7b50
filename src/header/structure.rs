//! Struct parser

use super::char_class::find_word;
use super::class::{find_single_colon, qualify};
use super::config::ScraperConfig;
use super::decl::{Declaration, StructDecl};
use super::error::{HeaderError, HeaderResult};
use super::parser::HeaderParser;
use super::scanner::{
    find_first_not_of, find_first_of, find_scope_borders, smart_find_first_of, Delimiter,
};

/// Name after `struct `: the first word that is not an attribute or export macro
fn struct_name<'t>(head: &'t str, config: &ScraperConfig) -> &'t str {
    let mut pos = 0;
    loop {
        pos = find_first_not_of(b" \t\r\n", head, pos);
        let end = find_first_of(b"{; \t\r\n", head, pos);
        let word = &head[pos..end];
        if word.starts_with("[[") || config.is_known_macro(word) {
            pos = end;
            continue;
        }
        return word;
    }
}

impl HeaderParser<'_> {
    /// Parse `struct Name { ... };` or `struct Name;`
    ///
    /// The body is split into member statements on top-level `;`; an inline
    /// method body's closing `}` ends its statement as well.
    ///
    /// # Errors
    ///
    /// [`HeaderError::MissingKeyword`] when there is no `struct` at or after
    /// `start`, [`HeaderError::MissingName`] when no name follows it.
    pub fn parse_struct(
        &mut self,
        start: usize,
        parent: Option<&str>,
        template: Option<String>,
    ) -> HeaderResult<(usize, Declaration)> {
        let text = self.text;
        let keyword = find_word(text, start, "struct").ok_or(HeaderError::MissingKeyword {
            keyword: "struct",
            position: start,
        })?;
        let after_keyword = keyword + "struct".len();

        let stop = smart_find_first_of(b";{", text, after_keyword);
        let head = &text[after_keyword..stop];
        let (head, extends) = match find_single_colon(head) {
            Some(colon) => (&head[..colon], Some(head[colon + 1..].trim().to_string())),
            None => (head, None),
        };
        let name = struct_name(head, self.config);
        if name.is_empty() {
            return Err(HeaderError::MissingName {
                construct: "struct",
                position: after_keyword,
            });
        }
        let name = qualify(parent, name);

        if stop >= text.len() || text.as_bytes()[stop] == b';' {
            self.diagnostics
                .debug(&format!("Forward declaration of struct {}", name));
            let decl = StructDecl {
                name,
                template,
                ..StructDecl::default()
            };
            return Ok(((stop + 1).min(text.len()), Declaration::Struct(decl)));
        }

        let body = find_scope_borders(text, stop, Delimiter::Brace)?;
        let (members, friends) =
            self.nested(|parser| parser.parse_members(body.open + 1, body.close, &name))?;

        let decl = StructDecl {
            name,
            template,
            extends: extends.filter(|bases| !bases.is_empty()),
            members: Some(members),
            friends,
        };
        Ok((self.consume_semicolon(body.end()), Declaration::Struct(decl)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::decl::Member;
    use crate::header::diagnostics::{CollectingDiagnostics, NullDiagnostics, Severity};

    fn parse_struct(text: &str) -> StructDecl {
        let config = ScraperConfig::default();
        let mut parser = HeaderParser::new(text, &config, &NullDiagnostics);
        match parser.parse_struct(0, None, None).unwrap() {
            (_, Declaration::Struct(s)) => s,
            (_, other) => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_opaque_struct_has_no_members() {
        let config = ScraperConfig::default();
        let diag = CollectingDiagnostics::new();
        let mut parser = HeaderParser::new("struct Opaque;", &config, &diag);
        let (end, decl) = parser.parse_struct(0, None, None).unwrap();
        assert_eq!(end, 14);
        let json = serde_json::to_value(&decl).unwrap();
        assert!(json.get("members").is_none());
        assert_eq!(diag.messages(Severity::Debug), vec!["Forward declaration of struct Opaque"]);
    }

    #[test]
    fn test_struct_fields_and_methods() {
        let s = parse_struct(
            "struct Point {\n  int x = 0, y = 0;\n  double Length() const { return 0; }\n  NO_COPY_SEMANTIC(Point);\n};",
        );
        assert_eq!(s.name, "Point");
        let members = s.members.unwrap();
        assert_eq!(members.len(), 3);
        assert!(matches!(&members[0], Member::Field(f) if f.name == "x"));
        assert!(matches!(&members[1], Member::Field(f) if f.name == "y"));
        assert!(matches!(&members[2], Member::Method(m) if m.name == "Length"));
    }

    #[test]
    fn test_struct_name_skips_decoration() {
        let s = parse_struct("struct PANDA_PUBLIC_API Frame : public Base { };");
        assert_eq!(s.name, "Frame");
        assert_eq!(s.members, Some(vec![]));
    }

    #[test]
    fn test_struct_bases_and_friends() {
        let s = parse_struct("struct Derived : public Base<int>, Mixin { friend class Builder; int x; };");
        assert_eq!(s.name, "Derived");
        assert_eq!(s.extends.as_deref(), Some("public Base<int>, Mixin"));
        assert_eq!(s.friends, vec!["Builder"]);
        let members = s.members.unwrap();
        assert_eq!(members.len(), 1);
        assert!(matches!(&members[0], Member::Field(f) if f.name == "x"));

        let plain = parse_struct("struct Plain { int y; };");
        assert!(plain.extends.is_none());
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("extends").is_none());
        assert!(json.get("friends").is_none());
    }

    #[test]
    fn test_nested_struct_and_enum_qualified() {
        let s = parse_struct("struct Outer { struct Inner; enum class Kind { A, B }; Kind kind; };");
        let members = s.members.unwrap();
        let names: Vec<_> = members
            .iter()
            .map(|m| match m {
                Member::Nested(d) => d.name().to_string(),
                Member::Field(f) => f.name.clone(),
                Member::Method(m) => m.name.clone(),
            })
            .collect();
        assert_eq!(names, vec!["Outer::Inner", "Outer::Kind", "kind"]);
    }

    #[test]
    fn test_missing_name() {
        let config = ScraperConfig::default();
        let mut parser = HeaderParser::new("struct {", &config, &NullDiagnostics);
        assert_eq!(
            parser.parse_struct(0, None, None).unwrap_err(),
            HeaderError::MissingName {
                construct: "struct",
                position: 6
            }
        );
        let mut parser = HeaderParser::new("class C;", &config, &NullDiagnostics);
        assert!(matches!(
            parser.parse_struct(0, None, None),
            Err(HeaderError::MissingKeyword { keyword: "struct", .. })
        ));
    }
}
