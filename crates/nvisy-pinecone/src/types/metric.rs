//! Distance metrics.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Similarity function used to rank vectors within an index.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Cosine similarity.
    #[default]
    Cosine,
    /// Euclidean distance.
    Euclidean,
    /// Dot product, sent as `dotproduct`.
    DotProduct,
}
