//! Type, argument and field parsing
//!
//! Best effort over declaration text such as `const std::map<K, V> &m = {}`.
//! There is no symbol table, so a trailing identifier is taken as the
//! declared name unless it is a builtin type word or follows `::`.

use super::config::ScraperConfig;
use super::decl::{Argument, TypeRef};
use super::scanner::{find_first_of, find_scope_borders, smart_find_first_of, smart_split_by, Delimiter};
use regex::Regex;
use std::sync::OnceLock;

static TRAILING_IDENT: OnceLock<Regex> = OnceLock::new();

/// Trailing identifier of a declarator: `...<sep>name`
fn trailing_ident() -> &'static Regex {
    TRAILING_IDENT.get_or_init(|| {
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*$").expect("static pattern compiles")
    })
}

/// Words that can only be part of a type, never a declared name
const BUILTIN_TYPE_WORDS: &[&str] = &[
    "void", "bool", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
    "auto", "wchar_t", "char8_t", "char16_t", "char32_t",
];

fn is_reference_byte(c: char) -> bool {
    c == '*' || c == '&'
}

fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a type expression
pub fn parse_type(text: &str, config: &ScraperConfig) -> TypeRef {
    let mut rest = text.trim();
    let mut ty = TypeRef::default();

    if rest.ends_with(']') {
        let open = find_first_of(b"[", rest, 0);
        ty.dimensions = Some(rest[open..].to_string());
        rest = rest[..open].trim_end();
    }

    // Leading modifiers: `const`, `static`, `[[nodiscard]]`, ...
    loop {
        let word_end = rest.find(|c: char| c.is_ascii_whitespace()).unwrap_or(rest.len());
        let word = &rest[..word_end];
        if word_end == rest.len() || !config.is_modifier(word) {
            break;
        }
        ty.modifiers.push(word.to_string());
        rest = rest[word_end..].trim_start();
    }

    // Trailing modifiers: `int const`, `char *const`
    loop {
        let word_start = rest
            .rfind(|c: char| c.is_ascii_whitespace() || is_reference_byte(c))
            .map_or(0, |i| i + 1);
        let word = &rest[word_start..];
        if word_start == 0 || !config.is_modifier(word) {
            break;
        }
        ty.modifiers.push(word.to_string());
        rest = rest[..word_start].trim_end();
    }

    let base_len = rest
        .trim_end_matches(|c: char| is_reference_byte(c) || c.is_ascii_whitespace())
        .len();
    if base_len < rest.len() {
        let reference: String = rest[base_len..].chars().filter(|c| is_reference_byte(*c)).collect();
        ty.reference = Some(reference);
        rest = &rest[..base_len];
    }

    if rest.ends_with('>') {
        let lt = smart_find_first_of(b"<", rest, 0);
        if let Ok(span) = find_scope_borders(rest, lt, Delimiter::Angle) {
            if span.end() == rest.len() {
                ty.template_args = smart_split_by(span.inner(rest), b',')
                    .into_iter()
                    .map(|arg| parse_type(arg, config))
                    .collect();
                rest = &rest[..lt];
            }
        }
    }

    ty.name = collapse_whitespace(rest);
    ty
}

/// Drop a bit-field width (`flags : 3`)
fn strip_bitfield(decl: &str) -> &str {
    let bytes = decl.as_bytes();
    let Some(colon) = decl.rfind(':') else {
        return decl;
    };
    let single = (colon == 0 || bytes[colon - 1] != b':') && bytes.get(colon + 1) != Some(&b':');
    let width = decl[colon + 1..].trim();
    if single && !width.is_empty() && width.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        decl[..colon].trim_end()
    } else {
        decl
    }
}

/// Split a declarator into (type text, name), name possibly empty
fn split_declarator(decl: &str) -> (&str, &str) {
    // Function pointer: `void (*callback)(int)`
    if let Some(star) = decl.find("(*") {
        let close = find_first_of(b")", decl, star);
        if close < decl.len() {
            return (decl, decl[star + 2..close].trim());
        }
    }

    let Some(caps) = trailing_ident().captures(decl) else {
        return (decl, "");
    };
    let Some(ident) = caps.get(1) else {
        return (decl, "");
    };
    let before = decl[..ident.start()].trim_end();
    let unnamed = before.is_empty()
        || before.ends_with("::")
        || BUILTIN_TYPE_WORDS.contains(&ident.as_str())
        || before.ends_with(|c: char| c == '<' || c == ',');

    if unnamed {
        (decl, "")
    } else {
        (before, ident.as_str())
    }
}

/// Parse one parameter or field declarator
///
/// Returns `None` for empty text and for a lone `void` parameter list.
pub fn parse_argument(text: &str, config: &ScraperConfig) -> Option<Argument> {
    let text = text.trim();
    if text.is_empty() || text == "void" {
        return None;
    }

    let eq = smart_find_first_of(b"=", text, 0);
    let (mut decl, mut default) = if eq < text.len() {
        (text[..eq].trim_end(), Some(text[eq + 1..].trim().to_string()))
    } else {
        (text, None)
    };

    // Brace initializer: `int x{5}`
    if default.is_none() && decl.ends_with('}') {
        let brace = smart_find_first_of(b"{", decl, 0);
        if brace < decl.len() {
            default = Some(decl[brace + 1..decl.len() - 1].trim().to_string());
            decl = decl[..brace].trim_end();
        }
    }

    decl = strip_bitfield(decl);

    let mut dimensions = None;
    if decl.ends_with(']') && !decl.contains("(*") {
        let open = find_first_of(b"[", decl, 0);
        dimensions = Some(decl[open..].to_string());
        decl = decl[..open].trim_end();
    }

    let (type_text, name) = split_declarator(decl);
    let mut ty = if type_text.contains("(*") {
        TypeRef::named(collapse_whitespace(type_text))
    } else {
        parse_type(type_text, config)
    };
    if dimensions.is_some() {
        ty.dimensions = dimensions;
    }

    Some(Argument {
        name: name.to_string(),
        ty,
        default,
    })
}

/// Parse a field statement, expanding `int a, *b` into one field each
pub fn parse_fields(statement: &str, config: &ScraperConfig) -> Vec<Argument> {
    let pieces = smart_split_by(statement, b',');
    let Some((first, rest)) = pieces.split_first() else {
        return Vec::new();
    };
    let Some(head) = parse_argument(first, config) else {
        return Vec::new();
    };

    // Base type text shared by the following declarators
    let head_decl = &first[..smart_find_first_of(b"=", first, 0)];
    let base = match head_decl.rfind(head.name.as_str()) {
        Some(pos) if !head.name.is_empty() => head_decl[..pos]
            .trim_end_matches(|c: char| is_reference_byte(c) || c.is_ascii_whitespace()),
        _ => head_decl,
    };

    let mut fields = vec![head];
    for piece in rest {
        if let Some(field) = parse_argument(&format!("{} {}", base, piece), config) {
            fields.push(field);
        }
    }
    fields
}
