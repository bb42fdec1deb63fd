//! Google Sheets values adapter.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::client::{build_client, decode_json, fetch_bytes};
use crate::upstream::{
    domain::{UpstreamError, UpstreamResult},
    ports::TabularSource,
};

const SOURCE: &str = "google sheets";
const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct ValueRangeBody {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Decodes a `values.get` payload into text cells.
///
/// A range with no data decodes to no rows.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] when `values` is not a list of rows.
pub fn decode_values(body: &[u8]) -> UpstreamResult<Vec<Vec<String>>> {
    let range: ValueRangeBody = decode_json(SOURCE, body)?;
    Ok(range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

/// Spreadsheet reader using an API key on publicly shared sheets.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl SheetsClient {
    /// Creates a client authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> UpstreamResult<Self> {
        Ok(Self {
            http: build_client(SOURCE, timeout)?,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| UpstreamError::malformed(SOURCE, format!("base url: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| UpstreamError::malformed(SOURCE, "base url cannot carry a path"))?
            .pop_if_empty()
            .extend([spreadsheet_id, "values", range]);
        Ok(url)
    }
}

#[async_trait]
impl TabularSource for SheetsClient {
    async fn rows(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Vec<Vec<String>>> {
        let url = self.values_url(spreadsheet_id, range)?;
        let request = self.http.get(url).query(&[("key", self.api_key.as_str())]);
        let body = fetch_bytes(SOURCE, request).await?;
        decode_values(&body)
    }
}

#[cfg(test)]
impl SheetsClient {
    pub(crate) fn url_for(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Url> {
        self.values_url(spreadsheet_id, range)
    }
}
