//! Canonical wire projection of insights.
//!
//! # Submodules
//! - [`serialized_insight`]: The flat canonical document and its encode/decode.
//! - [`legacy`]: Decode-time folding of deprecated field names.
//! - [`rounding`]: The decimal-precision policy applied to serialized fields.

pub mod legacy;
pub mod rounding;
pub mod serialized_insight;

pub use legacy::LegacyFieldAdapter;
pub use rounding::RoundingNormalizer;
pub use serialized_insight::SerializedInsight;
