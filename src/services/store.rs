//! Narrow REST client for the backing record store (PocketBase-shaped:
//! filtered list + upsert). Every failure surfaces as `Err(String)` so the
//! edge worker can log it and degrade to defaults; nothing here panics.

use log::debug;
use serde_json::Value;

use crate::models::{KeywordRecord, TemplateRecord};

#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

/// Keep filter values inert inside the store's `(field='value')` syntax.
fn sanitize_filter_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '(' | ')' | '\\'))
        .collect()
}

impl StoreClient {
    pub fn new(base_url: &str) -> Self {
        StoreClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_page(
        &self,
        collection: &str,
        filter: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Value>, String> {
        let url = format!("{}/api/collections/{}/records", self.base_url, collection);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("perPage", per_page.to_string()),
                ("page", page.to_string()),
                ("filter", filter.to_string()),
            ])
            .send()
            .await
            .map_err(|e| format!("store request failed: {e}"))?;
        if !resp.status().is_success() {
            return Err(format!("store returned {}", resp.status()));
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| format!("store response was not JSON: {e}"))?;
        Ok(body["items"].as_array().cloned().unwrap_or_default())
    }

    async fn fetch_first(&self, collection: &str, filter: &str) -> Result<Option<Value>, String> {
        let items = self.fetch_page(collection, filter, 1, 1).await?;
        Ok(items.into_iter().next())
    }

    /// Look up the keyword record for a slug. `Ok(None)` means the store
    /// answered and has no such record.
    pub async fn fetch_keyword(&self, slug: &str) -> Result<Option<KeywordRecord>, String> {
        let filter = format!("(slug='{}')", sanitize_filter_value(slug));
        let item = self.fetch_first("keywords", &filter).await?;
        Ok(item.and_then(|v| serde_json::from_value(v).ok()))
    }

    /// Look up the SEO template for a keyword type.
    pub async fn fetch_template(&self, kind: &str) -> Result<Option<TemplateRecord>, String> {
        let filter = format!("(type='{}')", sanitize_filter_value(kind));
        let item = self.fetch_first("seo_templates", &filter).await?;
        Ok(item.and_then(|v| serde_json::from_value(v).ok()))
    }

    /// One page of indexable keywords, for the sitemap.
    pub async fn list_indexable(
        &self,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<KeywordRecord>, String> {
        let items = self
            .fetch_page("keywords", "(allow_indexing=true)", page, per_page)
            .await?;
        Ok(items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }

    /// Create or update a keyword record: PATCH when the slug already has
    /// a record with an id, POST otherwise.
    pub async fn upsert_keyword(&self, record: &KeywordRecord) -> Result<(), String> {
        let existing = self.fetch_keyword(&record.slug).await?;
        let resp = match existing.filter(|r| !r.id.is_empty()) {
            Some(current) => {
                debug!("patching keyword record for {}", record.slug);
                let url = format!(
                    "{}/api/collections/keywords/records/{}",
                    self.base_url, current.id
                );
                self.http.patch(&url).json(record).send().await
            }
            None => {
                debug!("creating keyword record for {}", record.slug);
                let url = format!("{}/api/collections/keywords/records", self.base_url);
                self.http.post(&url).json(record).send().await
            }
        }
        .map_err(|e| format!("store upsert failed: {e}"))?;
        if !resp.status().is_success() {
            return Err(format!("store upsert returned {}", resp.status()));
        }
        Ok(())
    }
}
