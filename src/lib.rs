//! headerscan - Best-effort C++ Header Scraper
//!
//! Turns the raw text of a native C++ header, written in a constrained
//! in-house style, into a nested declaration tree that binding and interface
//! generators consume. It provides:
//! - A byte-offset text scanner with nesting-aware search and scope matching
//! - Comment stripping and `#include` extraction
//! - Parsers for classes, structs, namespaces, enums, aliases and macros,
//!   including X-macro tables
//! - Method, argument and type reconstruction
//! - JSON output via serde
//! - Batch scraping of files, optionally on the rayon pool
//!
//! This is not a C++ front end: there is no semantic analysis, template
//! instantiation or macro expansion.
//!
//! ## Quick Start
//!
//! ```rust
//! use headerscan::prelude::*;
//!
//! let header = r#"
//! #include <cstdint>
//! namespace ark {
//! class Foo : public Bar {
//! public:
//!     int x;
//! };
//! }
//! "#;
//!
//! let file = parse_header(header, &ScraperConfig::default(), &NullDiagnostics).unwrap();
//! assert_eq!(file.includes, vec!["<cstdint>"]);
//!
//! let json = file.declarations.to_json().unwrap();
//! assert!(json.contains("\"extends\":\"public Bar\""));
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Parse batches on the rayon thread pool

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

// Prelude module for convenient imports
pub mod prelude;

// Scraping core
pub mod header;

/// Re-export commonly used types for convenience
pub use header::{
    parse_header, scrape_files, Declaration, DeclarationTree, Diagnostics, HeaderError,
    HeaderFile, HeaderParser, HeaderResult, LogDiagnostics, ScraperConfig,
};
