pub mod artifact;
pub mod feature_store;
pub mod vector;

pub use artifact::{Artifact, FeatureMatrix, IndexEntry, SparseRow};
pub use feature_store::FeatureStore;
pub use vector::{cosine_similarity, FeatureVector, VectorError};
