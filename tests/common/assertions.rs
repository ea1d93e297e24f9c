use sysl::ast::{Application, Module, Relation};
use sysl::parser::Diagnostics;

/// Assert that parsing succeeds
pub fn assert_parses(source: &str) -> Module {
    match sysl::parser::parse(source) {
        Ok(module) => module,
        Err(diagnostics) => panic!("Expected source to parse successfully:\n{}", diagnostics),
    }
}

/// Assert that parsing fails
pub fn assert_parse_fails(source: &str) -> Diagnostics {
    match sysl::parser::parse(source) {
        Ok(module) => panic!("Expected source to fail parsing, got {:?}", module),
        Err(diagnostics) => {
            assert!(!diagnostics.is_empty(), "a failed parse must carry diagnostics");
            diagnostics
        }
    }
}

/// Assert the module contains an application with the given name
pub fn assert_has_app<'a>(module: &'a Module, name: &str) -> &'a Application {
    module
        .apps
        .get(name)
        .unwrap_or_else(|| panic!("Expected application: {}", name))
}

/// Assert the application declares a table with the given name
pub fn assert_has_table<'a>(app: &'a Application, name: &str) -> &'a Relation {
    app.get_type(name)
        .and_then(|ty| ty.relation())
        .unwrap_or_else(|| panic!("Expected table {} in {}", name, app.name))
}
