use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::concept::Concept;
use super::error::XbrlError;

// Reserved dimension names in the fact's `dimensions` map. Anything with a
// namespace separator in its key is an axis dimension.
const DIM_CONCEPT: &str = "concept";
const DIM_UNIT: &str = "unit";
const DIM_PERIOD: &str = "period";

/// The filing document as it arrives from the loader: a single `facts` map.
/// Entry order follows the source document (`serde_json` preserve_order).
#[derive(Debug, Deserialize)]
pub struct RawFiling {
    pub facts: serde_json::Map<String, serde_json::Value>,
}

/// One entry of the `facts` map, not yet type-resolved.
#[derive(Debug, Deserialize)]
pub struct RawFact {
    pub value: serde_json::Value,
    #[serde(default)]
    pub dimensions: serde_json::Map<String, serde_json::Value>,
}

/// A fact value after numeric coercion. Non-numeric strings are kept as-is,
/// coercion never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactValue {
    Number(f64),
    Text(String),
}

impl FactValue {
    fn coerce(raw: &serde_json::Value) -> Option<FactValue> {
        match raw {
            serde_json::Value::Number(n) => n.as_f64().map(FactValue::Number),
            serde_json::Value::String(s) => Some(match s.parse::<f64>() {
                Ok(n) => FactValue::Number(n),
                Err(_) => FactValue::Text(s.clone()),
            }),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FactValue::Number(n) => Some(*n),
            FactValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Number(n) => write!(f, "{}", n),
            FactValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A reporting period: an instant (no end date) or a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl Period {
    /// Parses `"2023-01-01"` or `"2023-01-01/2023-12-31"`. Segments may carry
    /// a time component, which is dropped.
    pub fn parse(s: &str) -> Result<Period, String> {
        match s.split_once('/') {
            Some((start, end)) => Ok(Period {
                start: parse_period_date(start)?,
                end: Some(parse_period_date(end)?),
            }),
            None => Ok(Period {
                start: parse_period_date(s)?,
                end: None,
            }),
        }
    }
}

fn parse_period_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::from_str(s)
        .or_else(|_| NaiveDateTime::from_str(s.trim_end_matches('Z')).map(|dt| dt.date()))
        .map_err(|_| format!("invalid ISO-8601 date `{}`", s))
}

/// A fact's membership on one axis dimension, e.g.
/// `ifrs-full:ComponentsOfEquityAxis` -> `ifrs-full:IssuedCapital`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMember {
    pub axis: Concept,
    pub member: String,
}

/// A fully validated fact as held by the store.
#[derive(Debug, Clone)]
pub struct StoredFact {
    pub key: String,
    pub concept: Concept,
    pub value: FactValue,
    pub unit: Option<String>,
    pub period: Period,
    pub axes: Vec<AxisMember>,
}

impl StoredFact {
    /// Validates one raw `facts` entry. Any deviation from the input contract
    /// fails naming the offending key.
    pub fn from_raw(key: &str, raw: &RawFact) -> Result<StoredFact, XbrlError> {
        let parse_err = |reason: String| XbrlError::Parse {
            key: key.to_string(),
            reason,
        };

        let value = FactValue::coerce(&raw.value)
            .ok_or_else(|| parse_err("value is not a string or number".to_string()))?;

        let concept = dimension_str(raw, DIM_CONCEPT)
            .ok_or_else(|| parse_err("missing `concept` dimension".to_string()))?
            .parse::<Concept>()
            .map_err(parse_err)?;

        let period = dimension_str(raw, DIM_PERIOD)
            .ok_or_else(|| parse_err("missing `period` dimension".to_string()))
            .and_then(|p| Period::parse(p).map_err(parse_err))?;

        // Units arrive as `namespace:code`; only the code is kept.
        let unit = match dimension_str(raw, DIM_UNIT) {
            Some(u) => Some(
                u.parse::<Concept>()
                    .map(|c| c.local().to_string())
                    .map_err(parse_err)?,
            ),
            None => None,
        };

        let mut axes = Vec::new();
        for (dim, member) in &raw.dimensions {
            if !dim.contains(':') {
                continue;
            }
            let axis = dim.parse::<Concept>().map_err(parse_err)?;
            let member = member
                .as_str()
                .ok_or_else(|| parse_err(format!("axis `{}` member is not a string", dim)))?;
            axes.push(AxisMember {
                axis,
                member: member.to_string(),
            });
        }

        Ok(StoredFact {
            key: key.to_string(),
            concept,
            value,
            unit,
            period,
            axes,
        })
    }

    pub fn normalized(&self, name: Option<String>) -> NormalizedFact {
        NormalizedFact {
            value: self.value.clone(),
            unit: self.unit.clone(),
            period_start: self.period.start,
            period_end: self.period.end,
            name,
        }
    }
}

fn dimension_str<'a>(raw: &'a RawFact, dim: &str) -> Option<&'a str> {
    raw.dimensions.get(dim).and_then(|v| v.as_str())
}

/// The record shape handed to callers of the query API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFact {
    pub value: FactValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub period_start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    /// Only present for subcomponent queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

static PASCAL_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z][a-z]*").unwrap());

/// Turns an axis-member identifier into a display label: strips the namespace
/// prefix and splits PascalCase into words, first letter capitalized.
/// `ifrs-full:IssuedCapital` -> `Issued capital`.
pub fn member_label(member: &str) -> String {
    let local = member.split_once(':').map_or(member, |(_, local)| local);
    let words: Vec<&str> = PASCAL_WORDS.find_iter(local).map(|m| m.as_str()).collect();
    capitalize(&words.join(" ").to_lowercase())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
