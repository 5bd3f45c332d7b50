//! Integration tests for the declaration parsers
//!
//! Whole headers go through `parse_header`; assertions are made on the typed
//! tree and on its JSON form.

use headerscan::prelude::*;
use serde_json::{json, Value};

fn scrape(text: &str) -> HeaderFile {
    parse_header(text, &ScraperConfig::default(), &NullDiagnostics).unwrap()
}

fn scrape_json(text: &str) -> Value {
    serde_json::to_value(scrape(text).declarations).unwrap()
}

// ============================================================================
// Classes and Structs
// ============================================================================

#[test]
fn test_class_with_base_and_field() {
    let json = scrape_json("class Foo : public Bar { int x; };");
    let foo = &json["Foo"];
    assert_eq!(foo["kind"], "class");
    assert_eq!(foo["name"], "Foo");
    assert_eq!(foo["extends"], "public Bar");
    assert_eq!(
        foo["members"],
        json!([{"field": {"name": "x", "type": {"name": "int"}}}])
    );
}

#[test]
fn test_opaque_struct_has_no_members_key() {
    let json = scrape_json("struct Opaque;");
    assert_eq!(json["Opaque"], json!({"kind": "struct", "name": "Opaque"}));
}

#[test]
fn test_class_in_house_style() {
    let header = r#"
namespace ark::mem {
class PANDA_PUBLIC_API HeapManager final : public BaseManager, private NonCopyable {
public:
    explicit HeapManager(size_t size);
    ~HeapManager() override;

    NO_COPY_SEMANTIC(HeapManager);
    NO_MOVE_SEMANTIC(HeapManager);

    [[nodiscard]] void *Allocate(size_t size, Alignment align = DEFAULT_ALIGNMENT);
    static HeapManager *Create(const std::vector<Region *> &regions);
    bool IsEmpty() const
    {
        return used_ == 0;
    }

    enum class State : uint8_t { IDLE, COLLECTING };

private:
    friend class GcWorker;
    size_t used_ {0};
    os::memory::Mutex lock_;
};
}  // namespace ark::mem
"#;
    let file = scrape(header);
    let ns = match file.declarations.get("mem") {
        Some(Declaration::Namespace(ns)) => ns,
        other => panic!("unexpected {:?}", other),
    };
    let class = match ns.declarations.get("HeapManager") {
        Some(Declaration::Class(class)) => class,
        other => panic!("unexpected {:?}", other),
    };

    assert_eq!(
        class.extends.as_deref(),
        Some("public BaseManager, private NonCopyable")
    );
    assert_eq!(class.friends, vec!["GcWorker"]);

    let members = class.members.as_ref().unwrap();
    let methods: Vec<&Method> = members
        .iter()
        .filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
        .collect();
    let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["HeapManager", "~HeapManager", "Allocate", "Create", "IsEmpty"]
    );

    let allocate = methods[2];
    assert_eq!(allocate.modifiers, vec!["[[nodiscard]]"]);
    assert_eq!(allocate.return_type.as_ref().unwrap().reference.as_deref(), Some("*"));
    assert_eq!(allocate.arguments[1].default.as_deref(), Some("DEFAULT_ALIGNMENT"));
    assert_eq!(methods[4].qualifiers, vec!["const"]);

    let fields: Vec<&str> = members
        .iter()
        .filter_map(|m| match m {
            Member::Field(f) => Some(f.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(fields, vec!["used_", "lock_"]);

    assert!(members.iter().any(|m| matches!(
        m,
        Member::Nested(Declaration::Enum(e)) if e.name == "HeapManager::State" && e.scoped
    )));
}

#[test]
fn test_struct_with_nested_struct() {
    let json = scrape_json("struct Outer {\n  struct Inner { int a; };\n  Inner inner;\n};");
    let members = json["Outer"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["nested"]["name"], "Outer::Inner");
    assert_eq!(members[0]["nested"]["kind"], "struct");
    assert_eq!(members[1]["field"]["type"]["name"], "Inner");
}

#[test]
fn test_struct_bases_and_friends() {
    let json = scrape_json("struct Derived : public Base { friend class Builder; int x; };");
    let derived = &json["Derived"];
    assert_eq!(derived["extends"], "public Base");
    assert_eq!(derived["friends"], json!(["Builder"]));
    assert_eq!(derived["members"].as_array().unwrap().len(), 1);
}

#[test]
fn test_comparison_initializer_does_not_swallow_members() {
    let file = scrape("class A { static constexpr bool kV = kX<kY; int y; };");
    let Some(Declaration::Class(class)) = file.declarations.get("A") else {
        panic!("class A missing");
    };
    let names: Vec<_> = class
        .members
        .as_ref()
        .unwrap()
        .iter()
        .map(|m| match m {
            Member::Field(f) => f.name.as_str(),
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["kV", "y"]);
}

#[test]
fn test_template_class() {
    let file = scrape("template <typename T, size_t N>\nclass SmallVector : public Storage<T, N> {\n    T data_[N];\n};");
    match file.declarations.get("SmallVector") {
        Some(Declaration::Class(class)) => {
            assert_eq!(class.template.as_deref(), Some("typename T, size_t N"));
            assert_eq!(class.extends.as_deref(), Some("public Storage<T, N>"));
            match &class.members.as_ref().unwrap()[0] {
                Member::Field(field) => {
                    assert_eq!(field.name, "data_");
                    assert_eq!(field.ty.dimensions.as_deref(), Some("[N]"));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_function_like_macro() {
    let json = scrape_json("#define FOO(a, b) ((a)+(b))");
    assert_eq!(
        json["FOO"],
        json!({"kind": "macro", "name": "FOO", "arguments": "a, b", "body": "((a)+(b))"})
    );
}

#[test]
fn test_xmacro_table_in_header() {
    let header = "// Opcode table\n#define ISA_LIST(_) \\\n    _(ADD, \"add\", 2) \\\n    _(RET, \"ret\", 0)\n\nstruct Isa;";
    let json = scrape_json(header);
    assert_eq!(
        json["ISA_LIST"]["values"],
        json!([["ADD", "\"add\"", "2"], ["RET", "\"ret\"", "0"]])
    );
    assert_eq!(json["Isa"]["kind"], "struct");
}

// ============================================================================
// Aliases and Namespaces
// ============================================================================

#[test]
fn test_type_alias() {
    let json = scrape_json("using MyInt = int;");
    assert_eq!(json["MyInt"]["type"]["name"], "int");
    assert!(json["MyInt"].get("value").is_none());
}

#[test]
fn test_using_declaration_has_no_type() {
    let json = scrape_json("using std::vector;");
    assert!(json["std::vector"].get("type").is_none());
    assert_eq!(json["std::vector"]["kind"], "alias");
    assert_eq!(json["std::vector"]["form"], "using");
}

#[test]
fn test_reopened_namespace_merges() {
    let file = scrape("namespace ark { class A; }\nnamespace ark { class B; }");
    assert_eq!(file.declarations.len(), 1);
    match file.declarations.get("ark") {
        Some(Declaration::Namespace(ns)) => assert_eq!(ns.declarations.names(), vec!["A", "B"]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_forward_declaration_after_definition_keeps_members() {
    let json = scrape_json("namespace ark { class Foo { int x; }; }\nnamespace ark { class Foo; }");
    let foo = &json["ark"]["declarations"]["Foo"];
    assert_eq!(foo["kind"], "class");
    assert_eq!(foo["members"].as_array().unwrap().len(), 1);
}

#[test]
fn test_declaration_order_is_preserved_in_json() {
    let file = scrape("struct Zeta;\nstruct Alpha;\nstruct Mid;");
    let json = file.declarations.to_json().unwrap();
    let zeta = json.find("Zeta").unwrap();
    let alpha = json.find("Alpha").unwrap();
    let mid = json.find("Mid").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unbalanced_class_is_an_error() {
    let err = parse_header(
        "class Broken {\n  int x;\n",
        &ScraperConfig::default(),
        &NullDiagnostics,
    )
    .unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(err, HeaderError::MalformedScope { delimiter: '{', .. }));
}

#[test]
fn test_skipped_statements_are_logged() {
    let diag = CollectingDiagnostics::new();
    let file = parse_header(
        "typedef int Handle;\nint GlobalCounter();\nstruct After;",
        &ScraperConfig::default(),
        &diag,
    )
    .unwrap();
    assert_eq!(file.declarations.names(), vec!["After"]);
    let debug = diag.messages(Severity::Debug);
    assert!(debug.iter().any(|m| m.contains("typedef int Handle")));
    assert!(debug.iter().any(|m| m.contains("GlobalCounter")));
}
