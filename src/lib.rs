//! Sysl model front end
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use sysl_ast as ast;
pub use sysl_lexer as lexer;
pub use sysl_parser as parser;
