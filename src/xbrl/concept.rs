use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Default taxonomy namespace for IFRS filings.
pub const IFRS_FULL: &str = "ifrs-full";

/// A namespaced concept identifier, e.g. `ifrs-full:Revenue`.
///
/// Keeps the namespace and local name as separate parts so concept and axis
/// matching never goes through ad-hoc string concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Concept {
    namespace: String,
    local: String,
}

impl Concept {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Concept {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// A concept in the `ifrs-full` namespace.
    pub fn ifrs_full(local: impl Into<String>) -> Self {
        Concept::new(IFRS_FULL, local)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.local)
    }
}

impl FromStr for Concept {
    type Err = String;

    fn from_str(s: &str) -> Result<Concept, String> {
        match s.split_once(':') {
            Some((ns, local)) if !ns.is_empty() && !local.is_empty() => {
                Ok(Concept::new(ns, local))
            }
            _ => Err(format!("not a namespaced identifier: `{}`", s)),
        }
    }
}

impl TryFrom<String> for Concept {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Concept::from_str(&s)
    }
}

impl From<Concept> for String {
    fn from(c: Concept) -> String {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let concept: Concept = "ifrs-full:Revenue".parse().unwrap();
        assert_eq!(concept.namespace(), "ifrs-full");
        assert_eq!(concept.local(), "Revenue");
        assert_eq!(concept, Concept::ifrs_full("Revenue"));
    }

    #[test]
    fn test_display_round_trip() {
        let concept = Concept::new("iso4217", "EUR");
        assert_eq!(concept.to_string(), "iso4217:EUR");
    }

    #[test]
    fn test_rejects_unqualified() {
        assert!("Revenue".parse::<Concept>().is_err());
        assert!(":Revenue".parse::<Concept>().is_err());
        assert!("ifrs-full:".parse::<Concept>().is_err());
    }
}
