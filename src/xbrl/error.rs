use super::concept::Concept;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XbrlError {
    /// The document itself is not a valid filing JSON payload.
    #[error("invalid filing document: {0}")]
    Document(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A single fact entry is malformed; `key` names the offending entry.
    #[error("malformed fact `{key}`: {reason}")]
    Parse { key: String, reason: String },

    /// One of the mandatory summary concepts has no facts in the filing.
    #[error("filing has no `{0}` fact")]
    MissingRequiredFact(Concept),

    #[error("no facts found for `{0}`")]
    NoFactsFound(Concept),

    /// Arithmetic was requested over a value that kept its string fallback.
    #[error("non-numeric value `{value}` in fact `{key}`")]
    NonNumericValue { key: String, value: String },
}
