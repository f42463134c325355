//! Filing acquisition from the filings.xbrl.org repository.

pub mod index;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use reqwest::Client;
use std::path::Path;
use url::Url;

use crate::utils::{dirs, http};

use self::index::FilingIndex;

pub const FXO_BASE_URL: &str = "https://filings.xbrl.org";
pub const DEFAULT_PAGE_SIZE: usize = 5000;

pub async fn fetch_index(
    client: &Client,
    from: NaiveDate,
    to: NaiveDate,
    page_size: usize,
    user_agent: &str,
) -> Result<FilingIndex> {
    let base = Url::parse(FXO_BASE_URL)?;
    let url = index::index_url(&base, from, to, page_size)?;

    info!("Fetching filing index from {}", url);
    let response = client
        .get(url.as_str())
        .header(reqwest::header::USER_AGENT, user_agent)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "filing index request failed with status: {}",
            response.status()
        ));
    }

    Ok(response.json().await?)
}

/// Downloads the xBRL-JSON document of every filing added in `[from, to)`
/// into `data_dir`, keyed by the URL's last path segment. Individual fetch
/// failures are logged and do not abort the batch. Returns the number of
/// newly downloaded documents.
pub async fn download_filings(
    client: &Client,
    data_dir: &Path,
    from: NaiveDate,
    to: NaiveDate,
    page_size: usize,
    user_agent: &str,
) -> Result<usize> {
    let index = fetch_index(client, from, to, page_size, user_agent).await?;
    info!("Index lists {} filings", index.data.len());

    dirs::ensure_dir(data_dir)?;
    let base = Url::parse(FXO_BASE_URL)?;

    let mut downloaded = 0;
    for entry in &index.data {
        let json_url = match &entry.attributes.json_url {
            Some(u) => u,
            None => continue,
        };

        let url = match base.join(json_url) {
            Ok(u) => u,
            Err(e) => {
                warn!("Skipping filing with unusable url `{}`: {}", json_url, e);
                continue;
            }
        };

        let filename = match url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
        {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping filing with no filename in url `{}`", url);
                continue;
            }
        };

        let filepath = data_dir.join(&filename);
        if filepath.exists() {
            debug!("{} already present, skipping", filename);
            continue;
        }

        match http::fetch_and_save(client, &url, &filepath, user_agent).await {
            Ok(()) => downloaded += 1,
            Err(e) => error!("{}: {}", filename, e),
        }
    }

    info!("Downloaded {} new filings", downloaded);
    Ok(downloaded)
}
