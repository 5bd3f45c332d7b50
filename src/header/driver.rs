//! Batch driver over header files on disk
//!
//! A header that fails to read or parse is reported once through
//! [`Diagnostics::parsing_failed`] and the batch carries on with the rest.

use super::config::ScraperConfig;
use super::diagnostics::{Diagnostics, LogDiagnostics};
use super::error::{HeaderError, HeaderResult};
use super::parallel::{parse_batch_with, ParallelConfig};
use super::parser::HeaderFile;
use std::path::{Path, PathBuf};

/// Outcome for one header file
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedHeader {
    /// File the result belongs to
    pub path: PathBuf,
    /// Parsed header or the error that stopped it
    pub result: HeaderResult<HeaderFile>,
}

impl ScrapedHeader {
    /// Whether the file parsed
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Read one header
pub fn read_header(path: &Path) -> HeaderResult<String> {
    std::fs::read_to_string(path).map_err(|e| HeaderError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Scrape files with default thread settings
pub fn scrape_files<P: AsRef<Path>>(
    paths: &[P],
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
) -> Vec<ScrapedHeader> {
    scrape_files_with(paths, config, diagnostics, &ParallelConfig::default())
}

/// Scrape files, reporting failures to a [`LogDiagnostics`] built from
/// `config.error_log`
pub fn scrape_files_logged<P: AsRef<Path>>(paths: &[P], config: &ScraperConfig) -> Vec<ScrapedHeader> {
    let diagnostics = match &config.error_log {
        Some(log) => LogDiagnostics::with_error_log(log),
        None => LogDiagnostics::new(),
    };
    scrape_files(paths, config, &diagnostics)
}

/// Scrape files in input order
///
/// Files are read sequentially and parsed as one batch.
pub fn scrape_files_with<P: AsRef<Path>>(
    paths: &[P],
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
    parallel: &ParallelConfig,
) -> Vec<ScrapedHeader> {
    let sources: Vec<HeaderResult<String>> = paths.iter().map(|p| read_header(p.as_ref())).collect();

    let texts: Vec<&str> = sources
        .iter()
        .filter_map(|source| source.as_ref().ok().map(String::as_str))
        .collect();
    let mut parsed = parse_batch_with(&texts, config, diagnostics, parallel).into_iter();

    let mut scraped = Vec::with_capacity(paths.len());
    let mut failures = 0usize;
    for (path, source) in paths.iter().zip(&sources) {
        let path = path.as_ref().to_path_buf();
        let result = match source {
            Ok(_) => parsed.next(),
            Err(e) => Some(Err(e.clone())),
        };
        // parse_batch_with yields one result per readable file
        let Some(result) = result else {
            continue;
        };

        if let Err(error) = &result {
            failures += 1;
            diagnostics.parsing_failed(&path, error);
            if let Ok(text) = source {
                diagnostics.debug(&error.format_in_source(text));
            }
        }
        scraped.push(ScrapedHeader { path, result });
    }

    diagnostics.info(&format!(
        "Scraped {} headers, {} failed",
        scraped.len(),
        failures
    ));
    scraped
}
