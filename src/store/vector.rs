//! Sparse feature rows and cosine similarity
//!
//! TF-IDF rows are mostly zeros, so each row keeps only its non-zero columns,
//! sorted ascending. Dense rows are converted on construction.

/// Reasons a row cannot become a [`FeatureVector`]
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VectorError {
    #[error("{indices} column indices but {values} values")]
    LengthMismatch { indices: usize, values: usize },

    #[error("column {column} is outside the feature width {dimensions}")]
    OutOfRange { column: u32, dimensions: usize },

    #[error("column {0} appears more than once")]
    DuplicateColumn(u32),

    #[error("non-finite value at column {0}")]
    NonFinite(u32),
}

/// A feature row stored as strictly increasing `(column, value)` pairs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    columns: Vec<u32>,
    values: Vec<f32>,
}

impl FeatureVector {
    /// Builds a row from a dense slice, dropping zero entries
    pub fn from_dense(dense: &[f32]) -> Result<Self, VectorError> {
        let mut columns = Vec::new();
        let mut values = Vec::new();

        for (column, &value) in dense.iter().enumerate() {
            let column = column as u32;
            if !value.is_finite() {
                return Err(VectorError::NonFinite(column));
            }
            if value != 0.0 {
                columns.push(column);
                values.push(value);
            }
        }

        Ok(Self { columns, values })
    }

    /// Builds a row from parallel column/value lists in any order
    pub fn from_sparse(
        columns: Vec<u32>,
        values: Vec<f32>,
        dimensions: usize,
    ) -> Result<Self, VectorError> {
        if columns.len() != values.len() {
            return Err(VectorError::LengthMismatch {
                indices: columns.len(),
                values: values.len(),
            });
        }

        let mut pairs: Vec<(u32, f32)> = columns.into_iter().zip(values).collect();
        for &(column, value) in &pairs {
            if column as usize >= dimensions {
                return Err(VectorError::OutOfRange { column, dimensions });
            }
            if !value.is_finite() {
                return Err(VectorError::NonFinite(column));
            }
        }

        pairs.sort_by_key(|&(column, _)| column);
        if let Some(pair) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(VectorError::DuplicateColumn(pair[0].0));
        }

        let (columns, values) = pairs
            .into_iter()
            .filter(|&(_, value)| value != 0.0)
            .unzip();

        Ok(Self { columns, values })
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.columns.len()
    }

    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0_f64;

        while i < self.columns.len() && j < other.columns.len() {
            match self.columns[i].cmp(&other.columns[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(self.values[i]) * f64::from(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Euclidean magnitude
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt()
    }
}

/// Cosine similarity between two rows
///
/// A zero-magnitude row has no direction; its similarity to anything is `0.0`.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    a.dot(b) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(values: &[f32]) -> FeatureVector {
        FeatureVector::from_dense(values).unwrap()
    }

    #[test]
    fn test_from_dense_drops_zeros() {
        let v = dense(&[0.0, 1.5, 0.0, 2.0]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v, FeatureVector::from_sparse(vec![3, 1], vec![2.0, 1.5], 4).unwrap());
    }

    #[test]
    fn test_from_dense_rejects_nan() {
        assert_eq!(
            FeatureVector::from_dense(&[0.1, f32::NAN]),
            Err(VectorError::NonFinite(1))
        );
    }

    #[test]
    fn test_from_sparse_validation() {
        assert_eq!(
            FeatureVector::from_sparse(vec![0, 1], vec![1.0], 4),
            Err(VectorError::LengthMismatch {
                indices: 2,
                values: 1
            })
        );
        assert_eq!(
            FeatureVector::from_sparse(vec![4], vec![1.0], 4),
            Err(VectorError::OutOfRange {
                column: 4,
                dimensions: 4
            })
        );
        assert_eq!(
            FeatureVector::from_sparse(vec![2, 0, 2], vec![1.0, 1.0, 3.0], 4),
            Err(VectorError::DuplicateColumn(2))
        );
        assert_eq!(
            FeatureVector::from_sparse(vec![1], vec![f32::INFINITY], 4),
            Err(VectorError::NonFinite(1))
        );
    }

    #[test]
    fn test_dot_only_counts_shared_columns() {
        let a = FeatureVector::from_sparse(vec![0, 2, 5], vec![1.0, 2.0, 3.0], 8).unwrap();
        let b = FeatureVector::from_sparse(vec![2, 3, 5], vec![4.0, 9.0, 0.5], 8).unwrap();
        assert!((a.dot(&b) - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_identical_rows_is_one() {
        let a = dense(&[0.3, 0.0, 0.7, 0.1]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_orthogonal_rows_is_zero() {
        let a = dense(&[1.0, 0.0]);
        let b = dense(&[0.0, 1.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_of_opposite_rows_is_minus_one() {
        let a = dense(&[1.0, 2.0]);
        let b = dense(&[-1.0, -2.0]);
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_with_zero_row_is_zero() {
        let a = dense(&[1.0, 2.0]);
        let zero = dense(&[0.0, 0.0]);
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        let a = dense(&[1.0, 1.0, 0.0]);
        let b = dense(&[5.0, 5.0, 0.0]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-9);
    }
}
