//! Batch parsing of in-memory headers
//!
//! Headers are independent of one another, so a batch parallelizes
//! trivially. With the `parallel` feature each header is parsed on the rayon
//! pool; without it the same functions run sequentially. Results are in
//! input order either way.
//!
//! ```toml
//! [dependencies]
//! headerscan = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use headerscan::header::{parallel::parse_batch, NullDiagnostics, ScraperConfig};
//!
//! let inputs = ["struct A;", "class B {};", "struct C { int x;"];
//! let results = parse_batch(&inputs, &ScraperConfig::default(), &NullDiagnostics);
//! assert_eq!(results.len(), 3);
//! assert!(results[0].is_ok());
//! assert!(results[2].is_err());
//! ```

use super::config::ScraperConfig;
use super::diagnostics::Diagnostics;
use super::error::HeaderResult;
use super::parser::{parse_header, HeaderFile};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Thread settings for a parallel batch
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use (None = rayon's global pool)
    pub num_threads: Option<usize>,
    /// Minimum number of headers handed to one task
    pub min_chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_chunk_size: 1,
        }
    }
}

impl ParallelConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads to use
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Set the minimum number of headers per task
    pub fn with_min_chunk_size(mut self, size: usize) -> Self {
        self.min_chunk_size = size;
        self
    }
}

/// Parse several headers, results in input order
pub fn parse_batch(
    inputs: &[&str],
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
) -> Vec<HeaderResult<HeaderFile>> {
    parse_batch_with(inputs, config, diagnostics, &ParallelConfig::default())
}

/// Parse several owned headers, results in input order
pub fn parse_batch_owned(
    inputs: Vec<String>,
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
) -> Vec<HeaderResult<HeaderFile>> {
    let borrowed: Vec<&str> = inputs.iter().map(String::as_str).collect();
    parse_batch(&borrowed, config, diagnostics)
}

/// Parse several headers on the rayon pool
///
/// A dedicated pool is built when `parallel.num_threads` is set; if that
/// fails the global pool is used and a warning is reported.
#[cfg(feature = "rayon")]
pub fn parse_batch_with(
    inputs: &[&str],
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
    parallel: &ParallelConfig,
) -> Vec<HeaderResult<HeaderFile>> {
    let run = || -> Vec<HeaderResult<HeaderFile>> {
        inputs
            .par_iter()
            .with_min_len(parallel.min_chunk_size.max(1))
            .map(|text| parse_header(text, config, diagnostics))
            .collect()
    };

    match parallel.num_threads {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                diagnostics.warning(&format!("Falling back to the global thread pool: {}", e));
                run()
            }
        },
        None => run(),
    }
}

/// Parse several headers sequentially (fallback when rayon is not available)
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_with(
    inputs: &[&str],
    config: &ScraperConfig,
    diagnostics: &dyn Diagnostics,
    _parallel: &ParallelConfig,
) -> Vec<HeaderResult<HeaderFile>> {
    inputs
        .iter()
        .map(|text| parse_header(text, config, diagnostics))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::diagnostics::NullDiagnostics;
    use crate::header::error::HeaderError;

    #[test]
    fn test_parse_batch_keeps_order() {
        let inputs = vec!["struct A;", "struct B;", "struct C;"];
        let results = parse_batch(&inputs, &ScraperConfig::default(), &NullDiagnostics);

        let names: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().unwrap().declarations.names()[0].to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_batch_with_failures() {
        let inputs = vec!["class A {};", "class B { int x;", "/* open"];
        let results = parse_batch(&inputs, &ScraperConfig::default(), &NullDiagnostics);

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(HeaderError::MalformedScope { .. })));
        assert!(matches!(results[2], Err(HeaderError::UnterminatedComment { .. })));
    }

    #[test]
    fn test_parse_batch_owned_and_thread_count() {
        let inputs: Vec<String> = (0..8).map(|i| format!("struct S{};", i)).collect();
        let results = parse_batch_owned(inputs.clone(), &ScraperConfig::default(), &NullDiagnostics);
        assert_eq!(results.len(), 8);

        let borrowed: Vec<&str> = inputs.iter().map(String::as_str).collect();
        let parallel = ParallelConfig::new().with_num_threads(2).with_min_chunk_size(3);
        let results = parse_batch_with(&borrowed, &ScraperConfig::default(), &NullDiagnostics, &parallel);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_parallel_config_defaults() {
        let config = ParallelConfig::default();
        assert_eq!(config.num_threads, None);
        assert_eq!(config.min_chunk_size, 1);
    }
}
