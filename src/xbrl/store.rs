use chrono::NaiveDate;
use log::debug;
use std::fs;
use std::path::Path;

use super::concept::Concept;
use super::error::XbrlError;
use super::facts::{member_label, NormalizedFact, RawFiling, StoredFact};

// Summary concepts resolved eagerly at load time.
pub const ENTITY_NAME_CONCEPT: &str = "NameOfReportingEntityOrOtherMeansOfIdentification";
pub const CURRENCY_CONCEPT: &str = "Revenue";
pub const ENTITY_DESCRIPTION_CONCEPT: &str =
    "DescriptionOfNatureOfEntitysOperationsAndPrincipalActivities";

/// One filing's fact collection, validated at load time and read-only after.
/// Queries are pure projections over the stored facts; iteration order is the
/// source document's entry order.
#[derive(Debug)]
pub struct FactStore {
    facts: Vec<StoredFact>,
    entity_name: String,
    currency: String,
    entity_description: String,
}

impl FactStore {
    pub fn from_path(path: impl AsRef<Path>) -> Result<FactStore, XbrlError> {
        let content = fs::read_to_string(path)?;
        FactStore::load(&content)
    }

    /// Parses and validates a filing document. Fails on the first malformed
    /// fact entry, or when any of the three summary concepts (entity name,
    /// revenue currency, entity description) has no facts.
    pub fn load(content: &str) -> Result<FactStore, XbrlError> {
        let raw: RawFiling = serde_json::from_str(content)?;

        let mut facts = Vec::with_capacity(raw.facts.len());
        for (key, entry) in &raw.facts {
            let raw_fact = serde_json::from_value(entry.clone()).map_err(|e| XbrlError::Parse {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            facts.push(StoredFact::from_raw(key, &raw_fact)?);
        }
        debug!("Loaded {} facts", facts.len());

        let entity_name = first_trimmed_value(&facts, ENTITY_NAME_CONCEPT)?;
        let entity_description = first_trimmed_value(&facts, ENTITY_DESCRIPTION_CONCEPT)?;

        // Native currency: the unit code of the first revenue fact.
        let revenue = Concept::ifrs_full(CURRENCY_CONCEPT);
        let revenue_fact = facts
            .iter()
            .find(|f| f.concept == revenue)
            .ok_or(XbrlError::MissingRequiredFact(revenue))?;
        let currency = revenue_fact
            .unit
            .clone()
            .ok_or_else(|| XbrlError::Parse {
                key: revenue_fact.key.clone(),
                reason: "revenue fact has no unit".to_string(),
            })?;

        Ok(FactStore {
            facts,
            entity_name,
            currency,
            entity_description,
        })
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn entity_description(&self) -> &str {
        &self.entity_description
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// All facts for an `ifrs-full` concept, in document order.
    ///
    /// With `subcomponent` set, `concept` names an axis instead: a fact
    /// matches when it carries that axis dimension (whatever its `concept`
    /// is), and the record gets a `name` derived from the axis member.
    pub fn all_facts(&self, concept: &str, subcomponent: bool) -> Vec<NormalizedFact> {
        let wanted = Concept::ifrs_full(concept);
        let mut records = Vec::new();
        for fact in &self.facts {
            if subcomponent {
                if let Some(axis) = fact.axes.iter().find(|a| a.axis == wanted) {
                    records.push(fact.normalized(Some(member_label(&axis.member))));
                }
            } else if fact.concept == wanted {
                records.push(fact.normalized(None));
            }
        }
        records
    }

    /// The fact with the maximum `period_start` for a concept. Ties keep the
    /// first occurrence in document order.
    pub fn latest_fact(&self, concept: &str) -> Result<NormalizedFact, XbrlError> {
        let mut latest: Option<NormalizedFact> = None;
        for fact in self.all_facts(concept, false) {
            match &latest {
                Some(best) if fact.period_start <= best.period_start => {}
                _ => latest = Some(fact),
            }
        }
        latest.ok_or_else(|| XbrlError::NoFactsFound(Concept::ifrs_full(concept)))
    }

    /// Sum of subcomponent values on `axis` whose `period_start` equals the
    /// given date exactly. Zero when nothing matches; fails if a matching
    /// value kept its string fallback.
    pub fn total_value(&self, axis: &str, period_start: NaiveDate) -> Result<f64, XbrlError> {
        let wanted = Concept::ifrs_full(axis);
        let mut total = 0.0;
        for fact in &self.facts {
            if fact.period.start != period_start {
                continue;
            }
            if !fact.axes.iter().any(|a| a.axis == wanted) {
                continue;
            }
            match fact.value.as_number() {
                Some(n) => total += n,
                None => {
                    return Err(XbrlError::NonNumericValue {
                        key: fact.key.clone(),
                        value: fact.value.to_string(),
                    })
                }
            }
        }
        Ok(total)
    }
}

fn first_trimmed_value(facts: &[StoredFact], concept: &str) -> Result<String, XbrlError> {
    let wanted = Concept::ifrs_full(concept);
    facts
        .iter()
        .find(|f| f.concept == wanted)
        .map(|f| f.value.to_string().trim().to_string())
        .ok_or(XbrlError::MissingRequiredFact(wanted))
}
