//! HTTP client for the EPIC handle resolver.

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::debug;

/// A handle record as returned by the resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct HandleRecord {
    #[serde(default)]
    pub values: Vec<HandleValue>,
}

/// One typed value of a handle record.
#[derive(Debug, Clone, Deserialize)]
pub struct HandleValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub data: HandleData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandleData {
    pub value: String,
}

impl HandleRecord {
    /// The URL the handle currently points at, if the record's first value
    /// is a URL entry.
    pub fn url(&self) -> Option<&str> {
        self.values
            .first()
            .filter(|value| value.value_type == "URL")
            .map(|value| value.data.value.as_str())
    }
}

/// Client for one resolver endpoint and prefix.
pub struct EpicClient {
    http: reqwest::Client,
    base_url: String,
    prefix: String,
    user: String,
    pass: String,
}

impl EpicClient {
    pub fn new(
        base_url: impl Into<String>,
        prefix: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            prefix: prefix.into(),
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// The handle prefix this client is configured for.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn handle_url(&self, pid: &str) -> String {
        format!("{}/{}", self.base_url, pid)
    }

    /// Fetches the handle record and returns the URL it points at, or
    /// `None` when the record carries no URL value.
    pub async fn resolve_url(&self, pid: &str) -> anyhow::Result<Option<String>> {
        let uri = self.handle_url(pid);
        debug!("GET {}", &uri);

        let res = self
            .http
            .get(&uri)
            .basic_auth(&self.user, Some(&self.pass))
            .send()
            .await
            .context("failed to reach the handle resolver")?;

        if !res.status().is_success() {
            bail!("handle lookup for '{}' failed with status {}", pid, res.status());
        }

        let record: HandleRecord = res
            .json()
            .await
            .context("failed to parse the handle record")?;
        Ok(record.url().map(str::to_string))
    }

    /// Re-points the handle at `new_url`.
    pub async fn update_url(&self, pid: &str, new_url: &str) -> anyhow::Result<()> {
        let uri = self.handle_url(pid);
        debug!("POST {}", &uri);

        let res = self
            .http
            .post(&uri)
            .basic_auth(&self.user, Some(&self.pass))
            .form(&[("URL", new_url)])
            .send()
            .await
            .context("failed to reach the handle resolver")?;

        if !res.status().is_success() {
            bail!("handle update for '{}' failed with status {}", pid, res.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_url_requires_a_url_typed_first_value() {
        let record: HandleRecord = serde_json::from_value(serde_json::json!({
            "values": [
                { "type": "URL", "data": { "value": "https://datahub.example.org/c1" } },
                { "type": "HS_ADMIN", "data": { "value": "ignored" } }
            ]
        }))
        .unwrap();
        assert_eq!(record.url(), Some("https://datahub.example.org/c1"));

        let admin_first: HandleRecord = serde_json::from_value(serde_json::json!({
            "values": [
                { "type": "HS_ADMIN", "data": { "value": "x" } },
                { "type": "URL", "data": { "value": "https://datahub.example.org/c1" } }
            ]
        }))
        .unwrap();
        assert_eq!(admin_first.url(), None);

        let empty: HandleRecord = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.url(), None);
    }

    #[test]
    fn handle_urls_join_cleanly() {
        let client = EpicClient::new("http://epicpid.local/epic/", "21.T12996", "user", "pass");
        assert_eq!(
            client.handle_url("21.T12996/P000000001C000000001"),
            "http://epicpid.local/epic/21.T12996/P000000001C000000001"
        );
    }
}
