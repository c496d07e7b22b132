//! Catalog extraction from source artifacts.
//!
//! Java model classes are parsed with tree-sitter, OpenAPI documents are read
//! as YAML. Extractors take source text and never touch the filesystem, so
//! callers decide where the text comes from (work tree, git revision, test).

use rayon::prelude::*;

use crate::error::DriftError;
use crate::types::Catalog;

pub mod java;
pub mod openapi;

mod helpers;

/// A source file handed to an extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub source: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Merged result of extracting many files.
#[derive(Debug, Default)]
pub struct Extraction {
    pub catalog: Catalog,
    /// Files that could not be parsed; their classes are absent from `catalog`
    pub errors: Vec<DriftError>,
}

/// Extract Java classes from many files in parallel.
///
/// Results are merged in path order whatever order the files arrive in, and a
/// class declared in several files keeps the definition from the last path.
pub fn extract_java_files(files: Vec<SourceFile>, num_threads: Option<usize>) -> Extraction {
    let pool = match num_threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new().num_threads(n).build().ok(),
        _ => None,
    };

    let extract_fn = |file: &SourceFile| (file.path.clone(), java::extract(&file.source, &file.path));

    let mut results: Vec<_> = match pool {
        Some(pool) => pool.install(|| files.par_iter().map(extract_fn).collect()),
        None => files.par_iter().map(extract_fn).collect(),
    };
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let mut extraction = Extraction::default();
    for (path, result) in results {
        match result {
            Ok(catalog) => {
                tracing::debug!(path = %path, classes = catalog.len(), "extracted classes");
                extraction.catalog.extend(catalog);
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path, e);
                extraction.errors.push(e);
            }
        }
    }

    extraction
}
