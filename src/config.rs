use anyhow::Result;
use std::path::PathBuf;

use crate::utils::dirs;

#[derive(Clone, Debug)]
pub struct OnepagerConfig {
    pub user_agent: String,
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
}

impl OnepagerConfig {
    pub fn from_env() -> Result<Self> {
        let user_agent =
            std::env::var("USER_AGENT").unwrap_or_else(|_| "software@example.com".to_string());

        let data_dir = PathBuf::from(
            std::env::var("ONEPAGER_DATA_DIR").unwrap_or_else(|_| dirs::FILINGS_DIR.to_string()),
        );

        let reports_dir = PathBuf::from(
            std::env::var("ONEPAGER_REPORTS_DIR").unwrap_or_else(|_| dirs::REPORTS_DIR.to_string()),
        );

        Ok(Self {
            user_agent,
            data_dir,
            reports_dir,
        })
    }
}
