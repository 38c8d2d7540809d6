//! The canonical flat document an insight serializes to.

use crate::error::{InsightError, Result};
use crate::model::insight::{Insight, InsightDirection, InsightType};
use crate::model::symbol::Symbol;
use crate::serialization::legacy::LegacyFieldAdapter;
use crate::serialization::rounding::RoundingNormalizer;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Flat snapshot of an [`Insight`] in its canonical wire shape.
///
/// Field names double as the canonical document keys. Deprecated keys from
/// older documents are folded into these fields by [`LegacyFieldAdapter`]
/// during [`SerializedInsight::from_document`]; they are never written on
/// encode.
///
/// Score and estimate fields carry rounded values so repeated snapshots of
/// the same insight compare stably in reports; reference values and weight
/// keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SerializedInsight {
    /// Insight id as 32 lowercase hex characters.
    pub id: String,
    /// Group id in the same hex form, when the insight is part of a group.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Name of the model that emitted the signal.
    #[serde(default)]
    pub source_model: String,
    /// Creation instant as fractional Unix seconds.
    #[serde(default)]
    pub created_time: f64,
    /// Close instant as fractional Unix seconds.
    #[serde(default)]
    pub close_time: f64,
    /// Durable security identifier.
    #[serde(default)]
    pub symbol: String,
    /// The instrument's ticker at creation time.
    #[serde(default)]
    pub ticker: String,
    /// Prediction type, encoded by variant name.
    #[serde(rename = "Type")]
    pub insight_type: InsightType,
    /// Predicted direction, encoded by variant name.
    pub direction: InsightDirection,
    /// Market snapshot at creation. Never rounded.
    #[serde(default, with = "decimal_number")]
    pub reference_value: Decimal,
    /// Market snapshot at close. Never rounded.
    #[serde(default, with = "decimal_number")]
    pub reference_value_final: Decimal,
    /// Prediction window in total seconds.
    #[serde(default)]
    pub period: f64,
    /// Predicted move size, rounded; absent when the model gave none.
    #[serde(default)]
    pub magnitude: Option<f64>,
    /// Model confidence, rounded; absent when the model gave none.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Portfolio weight. Never rounded; absent when the model gave none.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Whether the score below is the closing measurement.
    #[serde(default)]
    pub score_is_final: bool,
    /// Magnitude accuracy score, rounded.
    #[serde(default)]
    pub score_magnitude: f64,
    /// Direction accuracy score, rounded.
    #[serde(default)]
    pub score_direction: f64,
    /// Estimated monetary value of the insight, rounded.
    #[serde(default, with = "decimal_number")]
    pub estimated_value: Decimal,
    /// Free-form label supplied by the emitting model.
    #[serde(default)]
    pub tag: String,
}

impl SerializedInsight {
    /// Projects an insight into its canonical document form.
    ///
    /// Fails with [`InsightError::InvalidRecord`] when the insight carries
    /// no instrument identity; total for every other well-formed record.
    pub fn from_insight(insight: &Insight) -> Result<Self> {
        if insight.symbol().is_empty() {
            return Err(InsightError::InvalidRecord(format!(
                "insight {} has no instrument identity",
                insight.id().as_simple()
            )));
        }
        let rounding = RoundingNormalizer::default();
        Ok(Self {
            id: insight.id().as_simple().to_string(),
            group_id: insight.group_id().map(|g| g.as_simple().to_string()),
            source_model: insight.source_model().to_string(),
            created_time: unix_seconds(insight.created_time_utc()),
            close_time: unix_seconds(insight.close_time_utc()),
            symbol: insight.symbol().id().to_string(),
            ticker: insight.symbol().ticker().to_string(),
            insight_type: insight.insight_type(),
            direction: insight.direction(),
            reference_value: insight.reference_value(),
            reference_value_final: insight.reference_value_final(),
            period: period_seconds(insight.period()),
            magnitude: rounding.round_opt(insight.magnitude()),
            confidence: rounding.round_opt(insight.confidence()),
            weight: insight.weight(),
            score_is_final: insight.score().is_final(),
            score_magnitude: rounding.round(insight.score().magnitude()),
            score_direction: rounding.round(insight.score().direction()),
            estimated_value: rounding.round_decimal(insight.estimated_value()),
            tag: insight.tag().to_string(),
        })
    }

    /// Rebuilds an insight from a decoded document.
    pub fn to_insight(&self) -> Result<Insight> {
        let id = parse_hex_id(&self.id, "Id")?;
        let group_id = match &self.group_id {
            Some(raw) => Some(parse_hex_id(raw, "GroupId")?),
            None => None,
        };
        let created = datetime_from_unix(self.created_time, "CreatedTime")?;
        let close = datetime_from_unix(self.close_time, "CloseTime")?;
        let period = duration_from_seconds(self.period, "Period")?;

        let mut insight = Insight::new(
            Symbol::new(&self.symbol, &self.ticker),
            self.insight_type,
            self.direction,
            period,
            created,
        )
        .with_id(id)
        .with_close_time(close)
        .with_source_model(&self.source_model)
        .with_reference_value(self.reference_value)
        .with_tag(&self.tag);
        if let Some(group) = group_id {
            insight = insight.with_group_id(group);
        }
        if let Some(magnitude) = self.magnitude {
            insight = insight.with_magnitude(magnitude);
        }
        if let Some(confidence) = self.confidence {
            insight = insight.with_confidence(confidence);
        }
        if let Some(weight) = self.weight {
            insight = insight.with_weight(weight);
        }
        insight.set_reference_value_final(self.reference_value_final);
        insight.set_estimated_value(self.estimated_value);
        insight
            .score_mut()
            .set_score(self.score_magnitude, self.score_direction);
        if self.score_is_final {
            insight.score_mut().finalize();
        }
        Ok(insight)
    }

    /// Encodes the canonical JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the canonical document as a JSON value.
    pub fn to_document(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decodes a document, folding any deprecated keys into their canonical
    /// fields first.
    ///
    /// A canonical key always wins over its deprecated alias; the shadowed
    /// alias is logged and dropped.
    pub fn from_document(document: Value) -> Result<Self> {
        Self::decode(document, false)
    }

    /// Like [`SerializedInsight::from_document`], but a document carrying
    /// both a canonical key and a deprecated alias for the same field is
    /// rejected with [`InsightError::AmbiguousLegacyField`].
    pub fn from_document_strict(document: Value) -> Result<Self> {
        Self::decode(document, true)
    }

    /// Parses a JSON string and decodes it leniently.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    fn decode(document: Value, strict: bool) -> Result<Self> {
        let Value::Object(mut map) = document else {
            return Err(InsightError::MalformedDocument(
                "expected a JSON object".to_string(),
            ));
        };
        LegacyFieldAdapter::default().apply(&mut map, strict)?;
        serde_json::from_value(Value::Object(map))
            .map_err(|e| InsightError::MalformedDocument(e.to_string()))
    }
}

fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_micros() as f64 / 1_000_000.0
}

fn period_seconds(period: Duration) -> f64 {
    period.num_milliseconds() as f64 / 1_000.0
}

fn parse_hex_id(raw: &str, field: &str) -> Result<Uuid> {
    Uuid::try_parse(raw).map_err(|_| {
        InsightError::MalformedDocument(format!("{field} is not a valid hex id: '{raw}'"))
    })
}

fn datetime_from_unix(seconds: f64, field: &str) -> Result<DateTime<Utc>> {
    let micros = (seconds * 1_000_000.0).round();
    if !micros.is_finite() || micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return Err(InsightError::MalformedDocument(format!(
            "{field} is out of range: {seconds}"
        )));
    }
    DateTime::from_timestamp_micros(micros as i64).ok_or_else(|| {
        InsightError::MalformedDocument(format!("{field} is out of range: {seconds}"))
    })
}

fn duration_from_seconds(seconds: f64, field: &str) -> Result<Duration> {
    let millis = (seconds * 1_000.0).round();
    if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(InsightError::MalformedDocument(format!(
            "{field} is out of range: {seconds}"
        )));
    }
    Duration::try_milliseconds(millis as i64).ok_or_else(|| {
        InsightError::MalformedDocument(format!("{field} is out of range: {seconds}"))
    })
}

/// Serializes `Decimal` fields as JSON numbers, round-tripping through the
/// decimal string form so no binary representation error leaks into the
/// document.
mod decimal_number {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{self, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => Err(ser::Error::custom("decimal is not representable as a number")),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let float = f64::deserialize(deserializer)?;
        Decimal::from_str(&float.to_string())
            .map_err(|e| de::Error::custom(format!("not a decimal value: {e}")))
    }
}
