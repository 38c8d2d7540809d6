//! # Insight API
//!
//! Shared insight signal model and its canonical serialization contract.
//!
//! ## Modules
//! - `model`: The in-process signal types (`Insight`, `Symbol`, score and enums).
//! - `serialization`: The stable wire projection, legacy-key decoding and
//!   the rounding policy applied to serialized output.
//! - `error`: Error taxonomy shared by encode and decode paths.

pub mod error;
pub mod model;
pub mod serialization;

pub use error::{InsightError, Result};
pub use model::insight::{Insight, InsightDirection, InsightScore, InsightType};
pub use model::symbol::Symbol;
pub use serialization::legacy::LegacyFieldAdapter;
pub use serialization::rounding::RoundingNormalizer;
pub use serialization::serialized_insight::SerializedInsight;

pub mod prelude {
    pub use crate::error::{InsightError, Result};
    pub use crate::model::insight::{Insight, InsightDirection, InsightScore, InsightType};
    pub use crate::model::symbol::Symbol;
    pub use crate::serialization::serialized_insight::SerializedInsight;
}
