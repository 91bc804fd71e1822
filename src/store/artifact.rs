//! On-disk layout of the feature store
//!
//! The artifact is a JSON document holding the item table, the feature
//! matrix (dense or sparse), and optionally the title → row map:
//!
//! ```json
//! {
//!   "movies": [{ "id": 19995, "title": "Avatar" }],
//!   "features": { "format": "sparse", "dimensions": 5000,
//!                 "rows": [{ "indices": [3, 17], "values": [0.4, 0.2] }] },
//!   "indices": { "Avatar": 0 }
//! }
//! ```
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Movie;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub movies: Vec<Movie>,
    pub features: FeatureMatrix,
    /// Title → row map; derived from `movies` by first occurrence when absent
    #[serde(default)]
    pub indices: Option<HashMap<String, IndexEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum FeatureMatrix {
    Dense {
        rows: Vec<Vec<f32>>,
    },
    Sparse {
        dimensions: usize,
        rows: Vec<SparseRow>,
    },
}

impl FeatureMatrix {
    pub fn row_count(&self) -> usize {
        match self {
            FeatureMatrix::Dense { rows } => rows.len(),
            FeatureMatrix::Sparse { rows, .. } => rows.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseRow {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

/// A title-map value: one row, or every row sharing a duplicated title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexEntry {
    Single(usize),
    Many(Vec<usize>),
}

impl IndexEntry {
    /// Row used for lookups; duplicates resolve to the lowest row
    pub fn resolve(&self) -> Option<usize> {
        match self {
            IndexEntry::Single(row) => Some(*row),
            IndexEntry::Many(rows) => rows.iter().copied().min(),
        }
    }
}
