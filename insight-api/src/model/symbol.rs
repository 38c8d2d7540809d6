//! Instrument identity split into a durable security id and a display ticker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a tradable instrument.
///
/// `id` is the durable security identifier used for equality and lookup.
/// `ticker` is the human-readable name captured when the symbol was created;
/// it may diverge from the instrument's current listing after renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    id: String,
    ticker: String,
}

impl Symbol {
    pub fn new(id: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ticker: ticker.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// True when the durable identifier is empty, i.e. the symbol cannot be
    /// used as an instrument identity.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

// Equality and hashing use the durable id only; the ticker is presentation
// state and two snapshots of the same instrument must compare equal.
impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_ticker() {
        let at_creation = Symbol::new("SPY R735QTJ8XC9X", "SPY");
        let after_rename = Symbol::new("SPY R735QTJ8XC9X", "SPYDER");
        assert_eq!(at_creation, after_rename);
        assert_ne!(at_creation, Symbol::new("QQQ T3MO1488O0H1", "SPY"));
    }

    #[test]
    fn test_empty_identity() {
        assert!(Symbol::new("", "SPY").is_empty());
        assert!(!Symbol::new("SPY R735QTJ8XC9X", "").is_empty());
    }
}
