//! One-pager rendering: balance-sheet summary, equity-components table and a
//! bar chart, written as CSV plus a text chart per filing.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use itertools::Itertools;
use log::debug;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::xbrl::FactStore;

const MILLION: f64 = 1_000_000.0;
const CHART_WIDTH: usize = 40;

/// High-level balance sheet, in millions of the filing's native currency.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    pub current_assets: f64,
    pub noncurrent_assets: f64,
    pub liabilities: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityComponent {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct OnePager {
    pub entity_name: String,
    pub currency: String,
    pub description: String,
    pub as_of: NaiveDate,
    pub balance_sheet: BalanceSheet,
    /// Non-zero components as of `as_of`, descending by value, in millions.
    pub equity_components: Vec<EquityComponent>,
}

impl OnePager {
    pub fn build(store: &FactStore) -> Result<OnePager> {
        let as_of = store.latest_fact("Assets")?.period_start;

        let balance_sheet = BalanceSheet {
            current_assets: latest_number(store, "CurrentAssets")? / MILLION,
            noncurrent_assets: latest_number(store, "NoncurrentAssets")? / MILLION,
            liabilities: latest_number(store, "Liabilities")? / MILLION,
            equity: latest_number(store, "Equity")? / MILLION,
        };

        let equity_components: Vec<EquityComponent> = store
            .all_facts("ComponentsOfEquityAxis", true)
            .into_iter()
            .filter(|fact| fact.period_start == as_of)
            .filter_map(|fact| {
                let value = fact.value.as_number()?;
                if value == 0.0 {
                    return None;
                }
                Some(EquityComponent {
                    name: fact.name.unwrap_or_default(),
                    value: value / MILLION,
                })
            })
            .sorted_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal))
            .collect();

        Ok(OnePager {
            entity_name: store.entity_name().to_string(),
            currency: store.currency().to_string(),
            description: store.entity_description().to_string(),
            as_of,
            balance_sheet,
            equity_components,
        })
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        writer.write_record(["Entity", self.entity_name.as_str()])?;
        writer.write_record(["Currency", self.currency.as_str()])?;
        writer.write_record(["Description", self.description.as_str()])?;
        writer.write_record(["As of", self.as_of.to_string().as_str()])?;
        writer.write_record(None::<&[u8]>)?;

        let bs = &self.balance_sheet;
        writer.write_record(["", "Financing", "Assets"])?;
        writer.write_record(["Current Assets", "", millions(bs.current_assets).as_str()])?;
        writer.write_record([
            "Non-current Assets",
            "",
            millions(bs.noncurrent_assets).as_str(),
        ])?;
        writer.write_record(["Equity", millions(bs.equity).as_str(), ""])?;
        writer.write_record(["Liabilities", millions(bs.liabilities).as_str(), ""])?;
        writer.write_record(None::<&[u8]>)?;

        writer.write_record(["Equity type", format!("{} (m)", self.currency).as_str()])?;
        for component in &self.equity_components {
            writer.write_record([component.name.as_str(), millions(component.value).as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Horizontal bar chart of the equity components, smallest at the top
    /// like the original plot, bars proportional to the largest value.
    pub fn render_chart(&self) -> String {
        let mut out = format!(
            "{} equity components, {} (m)\n",
            self.entity_name, self.currency
        );

        let max = self
            .equity_components
            .iter()
            .map(|c| c.value.abs())
            .fold(0.0, f64::max);
        let label_width = self
            .equity_components
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);

        for component in self.equity_components.iter().rev() {
            let bar_len = if max > 0.0 {
                ((component.value.abs() / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            out.push_str(&format!(
                "{:<label_width$}  {} {}\n",
                component.name,
                "#".repeat(bar_len),
                millions(component.value),
            ));
        }
        out
    }
}

fn latest_number(store: &FactStore, concept: &str) -> Result<f64> {
    let fact = store.latest_fact(concept)?;
    fact.value
        .as_number()
        .ok_or_else(|| anyhow!("latest `{}` fact is not numeric: {}", concept, fact.value))
}

fn millions(value: f64) -> String {
    format!("{:.2}", value)
}

/// Output file stem: sanitized entity name plus the source filename stem.
pub fn output_stem(entity_name: &str, source: &Path) -> String {
    let entity: String = entity_name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("filing");
    format!("{}_{}", entity, stem)
}

/// Renders one filing into a CSV report and a chart text file, returning the
/// CSV path.
pub fn create_report(filing: &Path, reports_dir: &Path) -> Result<PathBuf> {
    let store = FactStore::from_path(filing)?;
    let pager = OnePager::build(&store)?;

    fs::create_dir_all(reports_dir)?;
    let stem = output_stem(&pager.entity_name, filing);

    let csv_path = reports_dir.join(format!("{}.csv", stem));
    pager.write_csv(&csv_path)?;

    let chart_path = reports_dir.join(format!("{}.txt", stem));
    fs::write(&chart_path, pager.render_chart())?;

    debug!("Rendered {} into {:?}", pager.entity_name, csv_path);
    Ok(csv_path)
}
