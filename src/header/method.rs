//! Method parsing
//!
//! Turns one member statement (`virtual Foo *Get(int id) const override`)
//! into a [`Method`]. Definitions are accepted too: anything from the body's
//! `{` on is ignored, as is a constructor initializer list.

use super::char_class::{find_word, is_ident_byte};
use super::config::ScraperConfig;
use super::decl::Method;
use super::scanner::{
    find_first_not_of, find_first_of, find_scope_borders, smart_find_first_of, smart_split_by,
    Delimiter,
};
use super::types::{parse_argument, parse_type};

/// Locate the name and the argument list's `(` of a declaration
///
/// Returns `(name_start, name_end, paren)`.
fn locate_name(s: &str) -> Option<(usize, usize, usize)> {
    if let Some(op) = find_word(s, 0, "operator") {
        let mut pos = find_first_not_of(b" \t\n", s, op + "operator".len());
        if s[pos..].starts_with("()") {
            pos += 2;
        }
        let paren = find_first_of(b"(", s, pos);
        return (paren < s.len()).then_some((op, paren, paren));
    }

    let paren = smart_find_first_of(b"(", s, 0);
    if paren >= s.len() {
        return None;
    }

    let bytes = s.as_bytes();
    let name_end = s[..paren].trim_end().len();
    let mut name_start = name_end;
    while name_start > 0
        && (is_ident_byte(bytes[name_start - 1]) || matches!(bytes[name_start - 1], b':' | b'~'))
    {
        name_start -= 1;
    }
    (name_start < name_end).then_some((name_start, name_end, paren))
}

/// Split trailing text after the argument list into qualifiers
///
/// Returns the qualifiers and a trailing return type, if any.
fn parse_postfix<'a>(postfix: &'a str) -> (Vec<String>, Option<&'a str>) {
    // Cut at a body or a constructor initializer list
    let mut end = smart_find_first_of(b"{", postfix, 0);
    let bytes = postfix.as_bytes();
    let mut colon = smart_find_first_of(b":", postfix, 0);
    while colon < end {
        if bytes.get(colon + 1) == Some(&b':') {
            colon = smart_find_first_of(b":", postfix, colon + 2);
            continue;
        }
        end = colon;
        break;
    }
    let mut postfix = postfix[..end].trim();

    let mut qualifiers = Vec::new();
    let mut trailing_return = None;

    let eq = smart_find_first_of(b"=", postfix, 0);
    let pure = if eq < postfix.len() {
        let value = postfix[eq + 1..].trim().to_string();
        postfix = postfix[..eq].trim_end();
        Some(format!("= {}", value))
    } else {
        None
    };

    if let Some(arrow) = postfix.find("->") {
        trailing_return = Some(postfix[arrow + 2..].trim());
        postfix = postfix[..arrow].trim_end();
    }

    qualifiers.extend(smart_split_by(postfix, b' ').into_iter().map(str::to_string));
    qualifiers.extend(pure);
    (qualifiers, trailing_return)
}

/// Parse a method, constructor, destructor or operator declaration
///
/// Returns `None` when the statement is not a function declaration: no
/// argument list, an initializer (`int x = f(1)`), or a function pointer
/// field (`void (*cb)(int)`).
pub fn parse_method(statement: &str, config: &ScraperConfig) -> Option<Method> {
    let s = statement.trim();
    let (name_start, name_end, paren) = locate_name(s)?;

    if smart_find_first_of(b"=", s, 0) < name_start {
        return None;
    }
    if s[paren + 1..].trim_start().starts_with(['*', '&']) {
        return None;
    }

    let mut method = Method {
        name: s[name_start..name_end]
            .split_ascii_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
        ..Method::default()
    };

    let mut prefix = s[..name_start].trim();
    loop {
        let word_end = prefix.find(|c: char| c.is_ascii_whitespace()).unwrap_or(prefix.len());
        let word = &prefix[..word_end];
        if word.is_empty() || !(config.is_modifier(word) || config.is_known_macro(word)) {
            break;
        }
        method.modifiers.push(word.to_string());
        prefix = prefix[word_end..].trim_start();
    }
    if !prefix.is_empty() {
        method.return_type = Some(parse_type(prefix, config));
    }

    let args = find_scope_borders(s, paren, Delimiter::Paren).ok()?;
    method.arguments = smart_split_by(args.inner(s), b',')
        .into_iter()
        .filter_map(|arg| parse_argument(arg, config))
        .collect();

    let (qualifiers, trailing_return) = parse_postfix(&s[args.end()..]);
    method.qualifiers = qualifiers;
    if let Some(ret) = trailing_return {
        method.return_type = Some(parse_type(ret, config));
    }

    Some(method)
}

/// Whether a statement is a call to an allow-listed macro
///
/// `NO_COPY_SEMANTIC(Foo)` looks like a constructor declaration but is not.
pub fn is_known_macro_call(statement: &str, config: &ScraperConfig) -> bool {
    let s = statement.trim_start();
    let name_end = s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(s.len());
    config.is_known_macro(&s[..name_end]) && s[name_end..].trim_start().starts_with('(')
}
