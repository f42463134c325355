use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

/// JSON:API response of the filing index endpoint.
#[derive(Debug, Deserialize)]
pub struct FilingIndex {
    pub data: Vec<FilingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FilingEntry {
    pub attributes: FilingAttributes,
}

#[derive(Debug, Deserialize)]
pub struct FilingAttributes {
    /// Relative URL of the xBRL-JSON document; null when the filing has none.
    pub json_url: Option<String>,
}

/// Builds the index query URL for filings added in `[from, to)`.
pub fn index_url(base: &Url, from: NaiveDate, to: NaiveDate, page_size: usize) -> Result<Url> {
    let filter = serde_json::json!([
        { "name": "date_added", "op": "ge", "val": from.to_string() },
        { "name": "date_added", "op": "lt", "val": to.to_string() },
    ]);

    let mut url = base.join("/api/filings")?;
    url.query_pairs_mut()
        .append_pair("page[size]", &page_size.to_string())
        .append_pair("filter", &filter.to_string());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url_filter() {
        let base = Url::parse("https://filings.xbrl.org").unwrap();
        let from = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let url = index_url(&base, from, to, 5000).unwrap();

        assert_eq!(url.path(), "/api/filings");
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("page[size]".to_string(), "5000".to_string())));
        let filter = &query.iter().find(|(k, _)| k == "filter").unwrap().1;
        assert!(filter.contains("2023-06-01"));
        assert!(filter.contains("\"op\":\"lt\""));
    }

    #[test]
    fn test_index_deserializes_null_json_url() {
        let body = r#"{
            "data": [
                { "attributes": { "json_url": "/path/to/filing.json" } },
                { "attributes": { "json_url": null } }
            ]
        }"#;
        let index: FilingIndex = serde_json::from_str(body).unwrap();
        assert_eq!(index.data.len(), 2);
        assert!(index.data[1].attributes.json_url.is_none());
    }
}
