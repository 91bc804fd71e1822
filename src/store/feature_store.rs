use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

use super::artifact::{Artifact, FeatureMatrix};
use super::vector::FeatureVector;

/// Precomputed feature rows, the item table, and the title → row map
///
/// Built once at startup and never mutated; share it behind an `Arc`.
#[derive(Debug)]
pub struct FeatureStore {
    movies: Vec<Movie>,
    rows: Vec<FeatureVector>,
    dimensions: usize,
    title_index: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl FeatureStore {
    /// Reads and validates the JSON artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AppError::Artifact(format!("cannot open {}: {}", path.display(), e))
        })?;

        let artifact: Artifact = serde_json::from_reader(BufReader::new(file))?;
        let store = Self::from_artifact(artifact)?;

        tracing::info!(
            path = %path.display(),
            movies = store.movies.len(),
            rows = store.rows.len(),
            dimensions = store.dimensions,
            titles = store.title_index.len(),
            non_zero = store.non_zero_entries(),
            "Feature store loaded"
        );

        Ok(store)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let artifact: Artifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Validates an artifact and converts it into a store
    pub fn from_artifact(artifact: Artifact) -> AppResult<Self> {
        if artifact.movies.len() != artifact.features.row_count() {
            tracing::warn!(
                movies = artifact.movies.len(),
                rows = artifact.features.row_count(),
                "Item table and feature matrix differ in length"
            );
        }

        let (rows, dimensions) = Self::build_rows(artifact.features)?;

        let title_index = match artifact.indices {
            Some(indices) => {
                let mut title_index = HashMap::with_capacity(indices.len());
                for (title, entry) in indices {
                    let row = entry.resolve().ok_or_else(|| {
                        AppError::Artifact(format!("title {:?} maps to no rows", title))
                    })?;
                    if row >= rows.len() {
                        return Err(AppError::Artifact(format!(
                            "title {:?} maps to row {} but the matrix has {} rows",
                            title,
                            row,
                            rows.len()
                        )));
                    }
                    title_index.insert(title, row);
                }
                title_index
            }
            None => {
                let mut title_index = HashMap::new();
                for (row, movie) in artifact.movies.iter().enumerate().take(rows.len()) {
                    title_index.entry(movie.title.clone()).or_insert(row);
                }
                title_index
            }
        };

        Ok(Self {
            movies: artifact.movies,
            rows,
            dimensions,
            title_index,
            loaded_at: Utc::now(),
        })
    }

    fn build_rows(features: FeatureMatrix) -> AppResult<(Vec<FeatureVector>, usize)> {
        let row_error = |row: usize, e: super::vector::VectorError| {
            AppError::Artifact(format!("feature row {}: {}", row, e))
        };

        match features {
            FeatureMatrix::Dense { rows } => {
                let dimensions = rows.first().map_or(0, Vec::len);
                let mut vectors = Vec::with_capacity(rows.len());
                for (row, values) in rows.iter().enumerate() {
                    if values.len() != dimensions {
                        return Err(AppError::Artifact(format!(
                            "feature row {} has width {}, expected {}",
                            row,
                            values.len(),
                            dimensions
                        )));
                    }
                    vectors.push(FeatureVector::from_dense(values).map_err(|e| row_error(row, e))?);
                }
                Ok((vectors, dimensions))
            }
            FeatureMatrix::Sparse { dimensions, rows } => {
                let vectors = rows
                    .into_iter()
                    .enumerate()
                    .map(|(row, sparse)| {
                        FeatureVector::from_sparse(sparse.indices, sparse.values, dimensions)
                            .map_err(|e| row_error(row, e))
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Ok((vectors, dimensions))
            }
        }
    }

    /// Row for an exact title match
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn row(&self, row: usize) -> Option<&FeatureVector> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    /// Item record for a row, if the item table covers it
    pub fn movie(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Selectable titles in item-table order, each listed once
    pub fn titles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.movies
            .iter()
            .map(|movie| movie.title.as_str())
            .filter(|title| seen.insert(*title))
            .collect()
    }

    /// Number of rows in the feature matrix
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stored non-zero weights across the whole matrix
    pub fn non_zero_entries(&self) -> usize {
        self.rows.iter().map(FeatureVector::nnz).sum()
    }

    /// Width shared by every feature row
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
