//! Error types for the recommendation core.
//!
//! Only genuine defects live here. Expected-empty outcomes (target rated
//! everything, no neighbors, nothing passed the filters) are modeled as
//! data on [`RecommendationSet`](crate::types::RecommendationSet), and a
//! failed embedding lookup degrades to "no boost" inside the boost path;
//! neither ever becomes an error.

use thiserror::Error;

use crate::types::{DishKey, UserId};

/// Result alias for recommendation operations.
pub type RecommendResult<T> = Result<T, RecommendError>;

/// Defects that fail a request fast instead of producing a wrong answer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    /// Star rating outside the 1..=5 scale.
    #[error("invalid rating {value}: ratings are integers 1..=5")]
    InvalidRating {
        /// The offending raw value.
        value: u8,
    },

    /// The target user has no rating history at all.
    ///
    /// A zero-review user has an undefined row mean, so centering (and any
    /// prediction derived from it) would be meaningless. Rejected up front.
    #[error("user {0} has no rating history")]
    UnknownUser(UserId),

    /// A dish key with no metadata in the catalog or any observation.
    #[error("no metadata found for dish '{0}'")]
    MissingDishMetadata(DishKey),

    /// Configuration rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
