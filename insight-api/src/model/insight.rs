//! The insight signal record.
//!
//! An `Insight` is a model-generated prediction about an instrument's future
//! price behavior. It is created once when a model emits a signal and later
//! mutated only by the scoring side as outcomes become known; it is never
//! deleted, only serialized repeatedly as successive snapshots.

use crate::model::symbol::Symbol;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The class of prediction an insight makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightType {
    /// Predicts the instrument's price.
    Price,
    /// Predicts the instrument's volatility.
    Volatility,
}

/// Predicted direction of the instrument over the insight period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightDirection {
    Down,
    Flat,
    Up,
}

/// Retrospective accuracy measurement attached to an insight once its
/// outcome becomes observable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InsightScore {
    magnitude: f64,
    direction: f64,
    is_final: bool,
}

impl InsightScore {
    pub fn new(magnitude: f64, direction: f64, is_final: bool) -> Self {
        Self {
            magnitude,
            direction,
            is_final,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Updates both score components. Ignored once the score is final.
    pub fn set_score(&mut self, magnitude: f64, direction: f64) {
        if self.is_final {
            return;
        }
        self.magnitude = magnitude;
        self.direction = direction;
    }

    /// Marks the score as final. The transition is one-way; calling this
    /// again has no effect.
    pub fn finalize(&mut self) {
        self.is_final = true;
    }
}

/// A model-generated prediction about a tradable instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    id: Uuid,
    group_id: Option<Uuid>,
    source_model: String,
    symbol: Symbol,
    insight_type: InsightType,
    direction: InsightDirection,
    reference_value: Decimal,
    reference_value_final: Decimal,
    period: Duration,
    magnitude: Option<f64>,
    confidence: Option<f64>,
    weight: Option<f64>,
    score: InsightScore,
    estimated_value: Decimal,
    tag: String,
    created_time_utc: DateTime<Utc>,
    close_time_utc: DateTime<Utc>,
}

impl Insight {
    /// Creates a new insight with a freshly generated id.
    ///
    /// The close time is derived as `created_time_utc + period`.
    pub fn new(
        symbol: Symbol,
        insight_type: InsightType,
        direction: InsightDirection,
        period: Duration,
        created_time_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: None,
            source_model: String::new(),
            symbol,
            insight_type,
            direction,
            reference_value: Decimal::ZERO,
            reference_value_final: Decimal::ZERO,
            period,
            magnitude: None,
            confidence: None,
            weight: None,
            score: InsightScore::default(),
            estimated_value: Decimal::ZERO,
            tag: String::new(),
            created_time_utc,
            close_time_utc: created_time_utc + period,
        }
    }

    /// Replaces the generated id, for rehydrating a stored insight.
    ///
    /// An id identifies one insight forever; never reuse one across records.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_group_id(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_source_model(mut self, source_model: impl Into<String>) -> Self {
        self.source_model = source_model.into();
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the market snapshot taken when the insight was generated.
    pub fn with_reference_value(mut self, reference_value: Decimal) -> Self {
        self.reference_value = reference_value;
        self
    }

    /// Overrides the derived close time. Clamped to the creation time so the
    /// close can never precede it.
    pub fn with_close_time(mut self, close_time_utc: DateTime<Utc>) -> Self {
        self.close_time_utc = close_time_utc.max(self.created_time_utc);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn group_id(&self) -> Option<Uuid> {
        self.group_id
    }

    pub fn source_model(&self) -> &str {
        &self.source_model
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn insight_type(&self) -> InsightType {
        self.insight_type
    }

    pub fn direction(&self) -> InsightDirection {
        self.direction
    }

    pub fn reference_value(&self) -> Decimal {
        self.reference_value
    }

    pub fn reference_value_final(&self) -> Decimal {
        self.reference_value_final
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.magnitude
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn score(&self) -> &InsightScore {
        &self.score
    }

    /// Mutable score access for the scoring side.
    pub fn score_mut(&mut self) -> &mut InsightScore {
        &mut self.score
    }

    pub fn estimated_value(&self) -> Decimal {
        self.estimated_value
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn created_time_utc(&self) -> DateTime<Utc> {
        self.created_time_utc
    }

    pub fn close_time_utc(&self) -> DateTime<Utc> {
        self.close_time_utc
    }

    /// Records the market snapshot observed when the insight closed.
    pub fn set_reference_value_final(&mut self, reference_value_final: Decimal) {
        self.reference_value_final = reference_value_final;
    }

    /// Records the estimated monetary value of acting on the insight.
    pub fn set_estimated_value(&mut self, estimated_value: Decimal) {
        self.estimated_value = estimated_value;
    }

    /// True once the insight's prediction window has passed.
    pub fn is_expired(&self, utc_now: DateTime<Utc>) -> bool {
        self.close_time_utc < utc_now
    }
}
