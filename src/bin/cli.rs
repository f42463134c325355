use anyhow::Result;
use chrono::NaiveDate;
use log::{error, info};
use onepager::{config::OnepagerConfig, fxo, report, utils::dirs};
use std::fs;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "onepager",
    about = "One-pager reports from filings.xbrl.org xBRL-JSON filings"
)]
enum Opt {
    /// Download filing documents added in a date range
    Download {
        /// Lower bound of date_added (inclusive), YYYY-MM-DD
        #[structopt(long)]
        from: NaiveDate,
        /// Upper bound of date_added (exclusive), YYYY-MM-DD
        #[structopt(long)]
        to: NaiveDate,
        /// Number of index entries to request
        #[structopt(long, default_value = "5000")]
        page_size: usize,
    },
    /// Render a one-pager for each downloaded filing
    Report {
        /// Stop after this many reports
        #[structopt(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let config = OnepagerConfig::from_env()?;

    match Opt::from_args() {
        Opt::Download {
            from,
            to,
            page_size,
        } => {
            let client = reqwest::Client::new();
            let count = fxo::download_filings(
                &client,
                &config.data_dir,
                from,
                to,
                page_size,
                &config.user_agent,
            )
            .await?;
            println!("Downloaded {} filings into {:?}", count, config.data_dir);
        }
        Opt::Report { limit } => {
            dirs::ensure_dir(&config.reports_dir)?;

            let mut filings: Vec<_> = fs::read_dir(&config.data_dir)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
                .collect();
            filings.sort();

            let mut rendered = 0;
            for filing in filings {
                if limit.map_or(false, |n| rendered >= n) {
                    break;
                }
                // A broken filing is skipped, the batch keeps going.
                match report::create_report(&filing, &config.reports_dir) {
                    Ok(out) => {
                        rendered += 1;
                        info!("{:?} -> {:?}", filing, out);
                    }
                    Err(e) => error!("Skipping {:?}: {}", filing, e),
                }
            }
            println!(
                "Rendered {} reports into {:?}",
                rendered, config.reports_dir
            );
        }
    }

    Ok(())
}
