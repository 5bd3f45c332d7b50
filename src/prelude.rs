//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from
//! headerscan. Importing it with a wildcard brings them into scope:
//!
//! ```
//! use headerscan::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Parsing
//! - [`parse_header`] - Scrape one header
//! - [`HeaderParser`] - Parser over preprocessed text
//! - [`HeaderFile`] - Includes and declarations of one header
//! - [`ScraperConfig`] - Allow-lists and limits
//!
//! ## Declarations
//! - [`Declaration`], [`Member`], [`DeclarationTree`] and the per-construct types
//!
//! ## Diagnostics and Errors
//! - [`Diagnostics`] - Sink trait
//! - [`LogDiagnostics`], [`CollectingDiagnostics`], [`NullDiagnostics`]
//! - [`HeaderError`], [`HeaderResult`]
//!
//! ## Batches
//! - [`parse_batch`], [`scrape_files`]

// ============================================================================
// Parsing
// ============================================================================

pub use crate::header::{parse_header, HeaderFile, HeaderParser, ScraperConfig};

// ============================================================================
// Declarations
// ============================================================================

pub use crate::header::{
    AliasDecl, AliasKind, Argument, ClassDecl, Declaration, DeclarationTree, EnumDecl, Enumerator,
    MacroDecl, Member, Method, NamespaceDecl, StructDecl, TypeRef,
};

// ============================================================================
// Diagnostics and Errors
// ============================================================================

pub use crate::header::{
    CollectingDiagnostics, Diagnostics, HeaderError, HeaderResult, LogDiagnostics,
    NullDiagnostics, Severity,
};

// ============================================================================
// Batches
// ============================================================================

pub use crate::header::{parse_batch, scrape_files, ParallelConfig, ScrapedHeader};
