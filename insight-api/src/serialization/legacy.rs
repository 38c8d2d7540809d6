//! Decode-time mapping of deprecated document keys onto canonical fields.

use crate::error::{InsightError, Result};
use crate::serialization::rounding::RoundingNormalizer;
use log::warn;
use serde_json::{Map, Value};

/// One row of the compatibility table.
struct LegacyField {
    /// Key written by older producers.
    legacy: &'static str,
    /// Canonical key the value folds into.
    canonical: &'static str,
    /// Whether the canonical field's rounding applies on the way in.
    rounded: bool,
}

/// Deprecated keys in decode order. Later rows win when two aliases target
/// the same canonical field, so `created-time` overrides `generated-time`.
const LEGACY_FIELDS: &[LegacyField] = &[
    LegacyField {
        legacy: "group-id",
        canonical: "GroupId",
        rounded: false,
    },
    LegacyField {
        legacy: "source-model",
        canonical: "SourceModel",
        rounded: false,
    },
    LegacyField {
        legacy: "generated-time",
        canonical: "CreatedTime",
        rounded: false,
    },
    LegacyField {
        legacy: "created-time",
        canonical: "CreatedTime",
        rounded: false,
    },
    LegacyField {
        legacy: "close-time",
        canonical: "CloseTime",
        rounded: false,
    },
    LegacyField {
        legacy: "reference-final",
        canonical: "ReferenceValueFinal",
        rounded: false,
    },
    LegacyField {
        legacy: "score-final",
        canonical: "ScoreIsFinal",
        rounded: false,
    },
    LegacyField {
        legacy: "score-magnitude",
        canonical: "ScoreMagnitude",
        rounded: true,
    },
    LegacyField {
        legacy: "score-direction",
        canonical: "ScoreDirection",
        rounded: true,
    },
    LegacyField {
        legacy: "estimated-value",
        canonical: "EstimatedValue",
        rounded: true,
    },
];

/// Folds deprecated field names into their canonical counterparts before a
/// document is read.
///
/// Canonical keys always take precedence: a legacy alias shadowed by a
/// canonical key already present in the document is dropped with a warning
/// in lenient mode and rejected in strict mode. Legacy keys are decode-only
/// and are never written back out.
#[derive(Debug, Default)]
pub struct LegacyFieldAdapter {
    rounding: RoundingNormalizer,
}

impl LegacyFieldAdapter {
    pub fn new(rounding: RoundingNormalizer) -> Self {
        Self { rounding }
    }

    /// Rewrites `document` in place, consuming every recognized legacy key.
    pub fn apply(&self, document: &mut Map<String, Value>, strict: bool) -> Result<()> {
        // Canonical keys written by the producer, as opposed to ones this
        // pass fills in from an alias.
        let originally_present: Vec<&'static str> = LEGACY_FIELDS
            .iter()
            .map(|field| field.canonical)
            .filter(|canonical| document.contains_key(*canonical))
            .collect();

        for field in LEGACY_FIELDS {
            let Some(value) = document.remove(field.legacy) else {
                continue;
            };
            if originally_present.contains(&field.canonical) {
                if strict {
                    return Err(InsightError::AmbiguousLegacyField {
                        canonical: field.canonical.to_string(),
                        legacy: field.legacy.to_string(),
                    });
                }
                warn!(
                    "document carries both '{}' and deprecated '{}'; keeping '{}'",
                    field.canonical, field.legacy, field.canonical
                );
                continue;
            }
            let value = if field.rounded {
                self.round_value(field.legacy, value)?
            } else {
                value
            };
            document.insert(field.canonical.to_string(), value);
        }
        Ok(())
    }

    fn round_value(&self, key: &str, value: Value) -> Result<Value> {
        let number = value.as_f64().ok_or_else(|| {
            InsightError::MalformedDocument(format!("'{key}' is not a number"))
        })?;
        Ok(Value::from(self.rounding.round(number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_folds_legacy_keys_into_canonical() {
        let mut document = as_map(json!({
            "group-id": "0f8fad5bd9cb469fa16570867728950e",
            "source-model": "MacdCross",
            "close-time": 1381138260.0,
            "score-final": true,
        }));
        LegacyFieldAdapter::default()
            .apply(&mut document, false)
            .unwrap();

        assert_eq!(document["GroupId"], "0f8fad5bd9cb469fa16570867728950e");
        assert_eq!(document["SourceModel"], "MacdCross");
        assert_eq!(document["CloseTime"], 1381138260.0);
        assert_eq!(document["ScoreIsFinal"], true);
        assert!(!document.contains_key("group-id"));
        assert!(!document.contains_key("score-final"));
    }

    #[test]
    fn test_rounds_flagged_fields_on_the_way_in() {
        let mut document = as_map(json!({
            "score-magnitude": 0.12345,
            "score-direction": 0.0123456,
            "estimated-value": 12.000049,
        }));
        LegacyFieldAdapter::default()
            .apply(&mut document, false)
            .unwrap();

        assert_eq!(document["ScoreMagnitude"], 0.1235);
        assert_eq!(document["ScoreDirection"], 0.0123);
        assert_eq!(document["EstimatedValue"], 12.0);
    }

    #[test]
    fn test_canonical_key_wins_when_lenient() {
        let mut document = as_map(json!({
            "SourceModel": "Current",
            "source-model": "Old",
        }));
        LegacyFieldAdapter::default()
            .apply(&mut document, false)
            .unwrap();

        assert_eq!(document["SourceModel"], "Current");
        assert!(!document.contains_key("source-model"));
    }

    #[test]
    fn test_ambiguity_rejected_when_strict() {
        let mut document = as_map(json!({
            "SourceModel": "Current",
            "source-model": "Old",
        }));
        let result = LegacyFieldAdapter::default().apply(&mut document, true);
        assert!(matches!(
            result,
            Err(InsightError::AmbiguousLegacyField { .. })
        ));
    }

    #[test]
    fn test_created_time_overrides_generated_time() {
        let mut document = as_map(json!({
            "generated-time": 1.0,
            "created-time": 2.0,
        }));
        LegacyFieldAdapter::default()
            .apply(&mut document, false)
            .unwrap();

        assert_eq!(document["CreatedTime"], 2.0);
    }

    #[test]
    fn test_type_mismatch_on_rounded_field() {
        let mut document = as_map(json!({ "score-magnitude": "high" }));
        let result = LegacyFieldAdapter::default().apply(&mut document, false);
        assert!(matches!(
            result,
            Err(InsightError::MalformedDocument(_))
        ));
    }
}
