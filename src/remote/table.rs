//! Tabular REST endpoint client.
//!
//! Rows are only ever partially updated, filtered by exact slug match. The
//! endpoint answers a successful no-op (slug not in the table) with an empty
//! representation, which is a warning for the operator, not an error.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("table endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Result of a partial update filtered by slug.
#[derive(Debug, PartialEq)]
pub enum UpdateOutcome {
    /// At least one row matched; the updated rows come back
    Updated(Vec<Value>),
    /// The request succeeded but no row matched the slug
    NotFound,
}

#[derive(Debug, Deserialize)]
struct SlugRow {
    slug: String,
}

/// Authenticated client for one table.
pub struct TableClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl TableClient {
    pub fn new(config: &Config, table: &str) -> Self {
        TableClient {
            http: reqwest::blocking::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            table: table.to_string(),
        }
    }

    fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Partial-update the row(s) where `slug` matches exactly.
    ///
    /// Asks for the updated representation back so that "zero rows matched"
    /// is distinguishable from success.
    pub fn patch_by_slug(
        &self,
        slug: &str,
        fields: &Map<String, Value>,
    ) -> Result<UpdateOutcome, TableError> {
        let response = self
            .http
            .patch(self.rest_url())
            .query(&[("slug", format!("eq.{}", slug))])
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .json(fields)
            .send()?;
        let rows: Vec<Value> = check(response)?.json()?;
        Ok(classify(rows))
    }

    /// Every slug in the table, one read call.
    pub fn slugs(&self) -> Result<Vec<String>, TableError> {
        let response = self
            .http
            .get(self.rest_url())
            .query(&[("select", "slug")])
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .send()?;
        let rows: Vec<SlugRow> = check(response)?.json()?;
        Ok(rows.into_iter().map(|row| row.slug).collect())
    }

    /// Read selected columns of the row(s) matching `slug`.
    pub fn select_by_slug(&self, slug: &str, columns: &str) -> Result<Vec<Value>, TableError> {
        let filter = format!("eq.{}", slug);
        let response = self
            .http
            .get(self.rest_url())
            .query(&[("select", columns), ("slug", filter.as_str())])
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .send()?;
        Ok(check(response)?.json()?)
    }
}

/// Empty representation means the filter matched nothing.
fn classify(rows: Vec<Value>) -> UpdateOutcome {
    if rows.is_empty() {
        UpdateOutcome::NotFound
    } else {
        UpdateOutcome::Updated(rows)
    }
}

fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, TableError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TableError::Status {
            status,
            body: response.text().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_representation_is_not_found() {
        assert_eq!(classify(vec![]), UpdateOutcome::NotFound);
    }

    #[test]
    fn returned_rows_are_a_successful_update() {
        let rows = vec![json!({ "slug": "mini-poker", "image_url": "https://x/y.webp" })];
        match classify(rows) {
            UpdateOutcome::Updated(rows) => assert_eq!(rows.len(), 1),
            other => panic!("expected Updated, got {:?}", other),
        }
    }

    #[test]
    fn rest_url_includes_the_table() {
        let config = Config {
            base_url: "https://example.supabase.co".to_string(),
            api_key: "k".to_string(),
            credential: crate::config::Credential::ServiceRole,
        };
        let client = TableClient::new(&config, "products");
        assert_eq!(client.rest_url(), "https://example.supabase.co/rest/v1/products");
    }
}
