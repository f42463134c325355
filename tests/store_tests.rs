use chrono::NaiveDate;
use onepager::xbrl::{FactStore, FactValue, XbrlError};
use std::fs;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixture() -> serde_json::Value {
    serde_json::json!({
        "facts": {
            "f-name": {
                "value": "  Acme Industries Oyj  ",
                "dimensions": {
                    "concept": "ifrs-full:NameOfReportingEntityOrOtherMeansOfIdentification",
                    "period": "2023-12-31"
                }
            },
            "f-desc": {
                "value": " Manufactures anvils and springs. ",
                "dimensions": {
                    "concept": "ifrs-full:DescriptionOfNatureOfEntitysOperationsAndPrincipalActivities",
                    "period": "2023-12-31"
                }
            },
            "f-rev-2022": {
                "value": "800000",
                "dimensions": {
                    "concept": "ifrs-full:Revenue",
                    "unit": "iso4217:EUR",
                    "period": "2022-01-01/2022-12-31"
                }
            },
            "f-rev-2023": {
                "value": "1234.5",
                "dimensions": {
                    "concept": "ifrs-full:Revenue",
                    "unit": "iso4217:EUR",
                    "period": "2023-01-01/2023-12-31"
                }
            },
            "f-rev-contracts": {
                "value": "999",
                "dimensions": {
                    "concept": "ifrs-full:RevenueFromContracts",
                    "unit": "iso4217:EUR",
                    "period": "2023-01-01/2023-12-31"
                }
            },
            "f-goodwill": {
                "value": "N/A",
                "dimensions": {
                    "concept": "ifrs-full:Goodwill",
                    "period": "2023-12-31"
                }
            },
            "f-lia-first": {
                "value": 111,
                "dimensions": {
                    "concept": "ifrs-full:Liabilities",
                    "unit": "iso4217:EUR",
                    "period": "2023-12-31"
                }
            },
            "f-lia-second": {
                "value": 222,
                "dimensions": {
                    "concept": "ifrs-full:Liabilities",
                    "unit": "iso4217:EUR",
                    "period": "2023-12-31"
                }
            },
            "f-eq-issued": {
                "value": 100,
                "dimensions": {
                    "concept": "ifrs-full:Equity",
                    "unit": "iso4217:EUR",
                    "period": "2023-01-01",
                    "ifrs-full:ComponentsOfEquityAxis": "ifrs-full:IssuedCapital"
                }
            },
            "f-eq-retained": {
                "value": 200,
                "dimensions": {
                    "concept": "ifrs-full:Equity",
                    "unit": "iso4217:EUR",
                    "period": "2023-01-01",
                    "ifrs-full:ComponentsOfEquityAxis": "ifrs-full:RetainedEarnings"
                }
            },
            "f-eq-2022": {
                "value": 50,
                "dimensions": {
                    "concept": "ifrs-full:Equity",
                    "unit": "iso4217:EUR",
                    "period": "2022-01-01",
                    "ifrs-full:ComponentsOfEquityAxis": "ifrs-full:IssuedCapital"
                }
            },
            "f-eq-unparsed": {
                "value": "n.m.",
                "dimensions": {
                    "concept": "ifrs-full:Equity",
                    "period": "2021-01-01",
                    "ifrs-full:ComponentsOfEquityAxis": "ifrs-full:OtherReserves"
                }
            }
        }
    })
}

fn load_fixture() -> FactStore {
    FactStore::load(&fixture().to_string()).unwrap()
}

fn remove_fact(doc: &mut serde_json::Value, key: &str) {
    doc["facts"].as_object_mut().unwrap().remove(key).unwrap();
}

#[test]
fn test_summary_attributes() {
    let store = load_fixture();
    assert_eq!(store.entity_name(), "Acme Industries Oyj");
    assert_eq!(store.currency(), "EUR");
    assert_eq!(store.entity_description(), "Manufactures anvils and springs.");
    assert_eq!(store.len(), 12);
}

#[test]
fn test_concept_query_matches_exactly() {
    let store = load_fixture();
    let revenue = store.all_facts("Revenue", false);
    // RevenueFromContracts must not match.
    assert_eq!(revenue.len(), 2);
    assert_eq!(revenue[0].value, FactValue::Number(800000.0));
    assert_eq!(revenue[0].unit.as_deref(), Some("EUR"));
    assert_eq!(revenue[0].period_start, date(2022, 1, 1));
    assert_eq!(revenue[0].period_end, Some(date(2022, 12, 31)));
    assert!(revenue[0].name.is_none());
}

#[test]
fn test_numeric_coercion_and_fallback() {
    let store = load_fixture();
    let revenue = store.all_facts("Revenue", false);
    assert_eq!(revenue[1].value, FactValue::Number(1234.5));

    let goodwill = store.all_facts("Goodwill", false);
    assert_eq!(goodwill[0].value, FactValue::Text("N/A".to_string()));
    // Instant period has no end date.
    assert_eq!(goodwill[0].period_start, date(2023, 12, 31));
    assert_eq!(goodwill[0].period_end, None);
}

#[test]
fn test_unknown_concept_yields_empty() {
    let store = load_fixture();
    assert!(store.all_facts("Inventories", false).is_empty());
    assert!(store.all_facts("SegmentsAxis", true).is_empty());
}

#[test]
fn test_subcomponent_query() {
    let store = load_fixture();
    let components = store.all_facts("ComponentsOfEquityAxis", true);
    // Matches on the axis dimension regardless of concept or period.
    assert_eq!(components.len(), 4);
    assert_eq!(components[0].name.as_deref(), Some("Issued capital"));
    assert_eq!(components[1].name.as_deref(), Some("Retained earnings"));
    assert_eq!(components[3].name.as_deref(), Some("Other reserves"));
}

#[test]
fn test_latest_fact() {
    let store = load_fixture();
    let latest = store.latest_fact("Revenue").unwrap();
    assert_eq!(latest.period_start, date(2023, 1, 1));
    assert_eq!(latest.value, FactValue::Number(1234.5));
}

#[test]
fn test_latest_fact_tie_keeps_first_occurrence() {
    let store = load_fixture();
    let latest = store.latest_fact("Liabilities").unwrap();
    assert_eq!(latest.value, FactValue::Number(111.0));
}

#[test]
fn test_latest_fact_no_matches() {
    let store = load_fixture();
    let err = store.latest_fact("Inventories").unwrap_err();
    assert!(matches!(err, XbrlError::NoFactsFound(_)));
    assert_eq!(err.to_string(), "no facts found for `ifrs-full:Inventories`");
}

#[test]
fn test_total_value_filters_by_period() {
    let store = load_fixture();
    let total = store
        .total_value("ComponentsOfEquityAxis", date(2023, 1, 1))
        .unwrap();
    // The 2022 component is excluded by the date filter.
    assert_eq!(total, 300.0);
}

#[test]
fn test_total_value_no_matches_is_zero() {
    let store = load_fixture();
    let total = store
        .total_value("ComponentsOfEquityAxis", date(2019, 1, 1))
        .unwrap();
    assert_eq!(total, 0.0);
}

#[test]
fn test_total_value_non_numeric_fails() {
    let store = load_fixture();
    let err = store
        .total_value("ComponentsOfEquityAxis", date(2021, 1, 1))
        .unwrap_err();
    match err {
        XbrlError::NonNumericValue { key, value } => {
            assert_eq!(key, "f-eq-unparsed");
            assert_eq!(value, "n.m.");
        }
        other => panic!("expected NonNumericValue, got {:?}", other),
    }
}

#[test]
fn test_missing_revenue_fails_construction() {
    let mut doc = fixture();
    remove_fact(&mut doc, "f-rev-2022");
    remove_fact(&mut doc, "f-rev-2023");
    let err = FactStore::load(&doc.to_string()).unwrap_err();
    assert!(
        matches!(err, XbrlError::MissingRequiredFact(ref c) if c.to_string() == "ifrs-full:Revenue")
    );
}

#[test]
fn test_missing_entity_name_fails_construction() {
    let mut doc = fixture();
    remove_fact(&mut doc, "f-name");
    let err = FactStore::load(&doc.to_string()).unwrap_err();
    assert!(matches!(err, XbrlError::MissingRequiredFact(_)));
}

#[test]
fn test_malformed_fact_names_offending_key() {
    let mut doc = fixture();
    doc["facts"]["f-broken"] = serde_json::json!({
        "value": "1",
        "dimensions": { "concept": "ifrs-full:Assets" }
    });
    let err = FactStore::load(&doc.to_string()).unwrap_err();
    match err {
        XbrlError::Parse { key, reason } => {
            assert_eq!(key, "f-broken");
            assert!(reason.contains("period"));
        }
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[test]
fn test_missing_concept_dimension_fails() {
    let mut doc = fixture();
    doc["facts"]["f-no-concept"] = serde_json::json!({
        "value": "1",
        "dimensions": { "period": "2023-12-31" }
    });
    let err = FactStore::load(&doc.to_string()).unwrap_err();
    assert!(matches!(err, XbrlError::Parse { ref key, .. } if key == "f-no-concept"));
}

#[test]
fn test_document_without_facts_key() {
    let err = FactStore::load(r#"{"data": []}"#).unwrap_err();
    assert!(matches!(err, XbrlError::Document(_)));
}

#[test]
fn test_from_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filing.json");
    fs::write(&path, fixture().to_string()).unwrap();

    let store = FactStore::from_path(&path).unwrap();
    assert_eq!(store.entity_name(), "Acme Industries Oyj");
}
