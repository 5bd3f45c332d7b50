//! Declaration types produced by the construct parsers
//!
//! Everything here is plain owned data. `None`/empty fields are omitted on
//! serialization, so a forward declaration serializes without a `members`
//! key and a using-declaration without a `type` key.

use super::tree::DeclarationTree;
use serde::Serialize;

/// One parsed construct
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    /// `class Name : bases { ... };`
    Class(ClassDecl),
    /// `struct Name { ... };`
    Struct(StructDecl),
    /// `namespace name { ... }`
    Namespace(NamespaceDecl),
    /// `#define NAME ...`
    Macro(MacroDecl),
    /// `using ...` / `namespace X = Y;`
    Alias(AliasDecl),
    /// `enum [class] Name { ... };`
    Enum(EnumDecl),
}

impl Declaration {
    /// Name the declaration is keyed by
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(d) => &d.name,
            Declaration::Struct(d) => &d.name,
            Declaration::Namespace(d) => &d.name,
            Declaration::Macro(d) => &d.name,
            Declaration::Alias(d) => &d.name,
            Declaration::Enum(d) => &d.name,
        }
    }

    /// Whether this is a forward or opaque declaration without a body
    pub fn is_forward(&self) -> bool {
        match self {
            Declaration::Class(d) => d.members.is_none(),
            Declaration::Struct(d) => d.members.is_none(),
            Declaration::Enum(d) => d.values.is_none(),
            _ => false,
        }
    }

    /// Short lowercase kind name, as used in serialized output
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Class(_) => "class",
            Declaration::Struct(_) => "struct",
            Declaration::Namespace(_) => "namespace",
            Declaration::Macro(_) => "macro",
            Declaration::Alias(_) => "alias",
            Declaration::Enum(_) => "enum",
        }
    }
}

/// A class
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ClassDecl {
    /// Name, qualified with enclosing classes (`Outer::Inner`)
    pub name: String,
    /// Raw `template<...>` parameter text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Raw base list after the inheritance colon (`public Bar`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Members; `None` for a forward declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    /// Names from `friend class X;`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub friends: Vec<String>,
}

/// A struct
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StructDecl {
    /// Name, qualified with enclosing classes
    pub name: String,
    /// Raw `template<...>` parameter text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Raw base list after the inheritance colon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Members; `None` for a forward declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    /// Names from `friend class X;`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub friends: Vec<String>,
}

/// A namespace and everything declared in it
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NamespaceDecl {
    /// Innermost name segment; empty for an anonymous namespace
    pub name: String,
    /// Nested declarations
    pub declarations: DeclarationTree,
}

/// A `#define`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MacroDecl {
    /// Macro name
    pub name: String,
    /// Verbatim parameter list of a function-like macro
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
    /// Single-line body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Rows of an X-macro table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<String>>>,
}

/// Which alias form was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasKind {
    /// `using X = Type;`
    Type,
    /// `using ns::X;`
    Using,
    /// `using namespace ns;`
    UsingNamespace,
    /// `namespace X = other::ns;`
    Namespace,
}

/// A type alias, using-declaration or namespace alias
///
/// The right-hand side is a type expression, not a value, and is stored under
/// `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasDecl {
    /// Alias name (or the used name for using-declarations)
    pub name: String,
    /// Form of the alias, serialized as `form` next to the `kind` tag
    #[serde(rename = "form")]
    pub kind: AliasKind,
    /// Raw `template<...>` parameter text of an alias template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Aliased type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

/// An enumeration
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EnumDecl {
    /// Name, qualified with enclosing classes
    pub name: String,
    /// `enum class` / `enum struct`
    pub scoped: bool,
    /// Underlying type after `:`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    /// Enumerators; `None` for an opaque declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Enumerator>>,
}

/// One enumerator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumerator {
    /// Enumerator name
    pub name: String,
    /// Raw initializer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A member of a class or struct body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    /// Data member
    Field(Argument),
    /// Method, constructor, destructor or operator
    Method(Method),
    /// Nested class, struct, enum or alias
    Nested(Declaration),
}

/// A field or a function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Declared name; empty for unnamed parameters
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Raw default value or initializer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A method declaration or definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Method {
    /// Name (`Foo`, `~Foo`, `operator()`, ...)
    pub name: String,
    /// Leading modifiers (`virtual`, `static`, `[[nodiscard]]`, ...)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Return type; `None` for constructors and destructors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    /// Parameters in order
    pub arguments: Vec<Argument>,
    /// Trailing qualifiers (`const`, `override`, `= 0`, ...)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<String>,
}

/// A type expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TypeRef {
    /// Base name without modifiers or template arguments (`std::vector`)
    pub name: String,
    /// Modifiers such as `const` or `volatile`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Template arguments, parsed recursively
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_args: Vec<TypeRef>,
    /// Pointer/reference part (`*`, `&`, `&&`, `**`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Array dimensions (`[4][N]`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

impl TypeRef {
    /// A bare named type
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
