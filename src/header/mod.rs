//! Header scraping core
//!
//! Everything needed to turn the raw text of a C++ header into a
//! [`DeclarationTree`], without a C++ grammar.
//!
//! # Module Organization
//!
//! ## Text Scanner
//! - [`scanner`] - Offset search, nesting-aware search, scope matching, splitting
//! - [`char_class`] - Byte sets and whole-word matching
//! - [`source_location`] - Line/column tracking for error messages
//!
//! ## Preprocessor Stage
//! - [`preprocess`] - Comment stripping and include extraction
//!
//! ## Declaration Parsers
//! - [`parser`] - [`HeaderParser`] and the dispatch driver
//! - [`class`], [`structure`], [`namespace`], [`using`], [`define`],
//!   [`enumeration`] - One construct each, as `impl HeaderParser` blocks
//! - [`method`], [`types`] - Methods, arguments, fields and type expressions
//!
//! ## Output
//! - [`decl`] - Declaration types
//! - [`tree`] - Ordered declaration tree
//!
//! ## Ambient
//! - [`config`] - Allow-lists and limits
//! - [`diagnostics`] - Diagnostics sinks
//! - [`error`] - Error type
//! - [`parallel`], [`driver`] - Batches of headers and files on disk

// ============================================================================
// Module Declarations
// ============================================================================

pub mod char_class;
pub mod config;
pub mod decl;
pub mod diagnostics;
pub mod error;
pub mod method;
pub mod preprocess;
pub mod scanner;
pub mod source_location;
pub mod tree;
pub mod types;

// Construct parsers (impl blocks on HeaderParser)
pub mod class;
pub mod define;
pub mod enumeration;
pub mod namespace;
pub mod parser;
pub mod structure;
pub mod using;

// Batch parsing (always available, uses rayon when feature is enabled)
pub mod driver;
pub mod parallel;

// ============================================================================
// Core Types
// ============================================================================

pub use parser::{parse_header, HeaderFile, HeaderParser};
pub use tree::DeclarationTree;

// ============================================================================
// Declarations
// ============================================================================

pub use decl::{
    AliasDecl, AliasKind, Argument, ClassDecl, Declaration, EnumDecl, Enumerator, MacroDecl,
    Member, Method, NamespaceDecl, StructDecl, TypeRef,
};

// ============================================================================
// Configuration, Diagnostics and Errors
// ============================================================================

pub use config::ScraperConfig;
pub use diagnostics::{CollectingDiagnostics, Diagnostics, LogDiagnostics, NullDiagnostics, Severity};
pub use error::{HeaderError, HeaderResult};
pub use source_location::SourcePosition;

// ============================================================================
// Batches
// ============================================================================

pub use driver::{scrape_files, scrape_files_logged, ScrapedHeader};
pub use parallel::{parse_batch, ParallelConfig};
