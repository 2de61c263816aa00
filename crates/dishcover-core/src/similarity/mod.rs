//! User-user similarity over zero-filled, mean-centered rating rows.

use std::collections::HashMap;

use dishcover_embeddings::similarity::cosine_similarity;
use tracing::debug;

use crate::matrix::FilledMatrix;
use crate::types::UserId;

/// Symmetric user × user cosine-similarity matrix.
///
/// Values lie in [-1, 1]. The diagonal is computed like any other pair,
/// not forced to 1.0: a row that centers to the zero vector (a user whose
/// ratings are all identical) has similarity 0.0 to everyone, including
/// itself. No shrinkage or smoothing is applied.
#[derive(Debug)]
pub struct UserSimilarityMatrix {
    users: Vec<UserId>,
    user_index: HashMap<UserId, usize>,
    values: Vec<f32>,
}

impl UserSimilarityMatrix {
    /// Compute all pairwise similarities from the filled matrix.
    ///
    /// Pure and deterministic: the same matrix always produces the same
    /// values, independent of any warming or call order elsewhere.
    #[must_use]
    pub fn compute(filled: &FilledMatrix) -> Self {
        let users = filled.users().to_vec();
        let n = users.len();
        let mut values = vec![0.0f32; n * n];

        if filled.width() > 0 {
            for i in 0..n {
                for j in i..n {
                    // Rows share the dish axis, so the error paths
                    // (dimension mismatch, empty input) are unreachable.
                    let similarity =
                        cosine_similarity(filled.row(i), filled.row(j)).unwrap_or(0.0);
                    values[i * n + j] = similarity;
                    values[j * n + i] = similarity;
                }
            }
        }

        debug!(users = n, "computed user similarity matrix");
        Self {
            user_index: users.iter().enumerate().map(|(i, u)| (*u, i)).collect(),
            users,
            values,
        }
    }

    /// Similarity between two users; `None` when either is unknown.
    #[must_use]
    pub fn get(&self, a: UserId, b: UserId) -> Option<f32> {
        let i = self.user_index.get(&a)?;
        let j = self.user_index.get(&b)?;
        Some(self.values[i * self.users.len() + j])
    }

    /// All (other user, similarity) pairs for one user, in user order.
    pub fn similarities_from(&self, user: UserId) -> Vec<(UserId, f32)> {
        let Some(&i) = self.user_index.get(&user) else {
            return Vec::new();
        };
        self.users
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, other)| (*other, self.values[i * self.users.len() + j]))
            .collect()
    }

    /// Users on both axes, sorted.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Test-support constructor from explicit values (row-major, n × n).
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn from_parts(users: Vec<UserId>, values: Vec<f32>) -> Self {
        assert_eq!(values.len(), users.len() * users.len());
        Self {
            user_index: users.iter().enumerate().map(|(i, u)| (*u, i)).collect(),
            users,
            values,
        }
    }
}
