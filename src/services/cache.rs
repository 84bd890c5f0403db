//! Request-time lookup cache for the edge worker. Keyword and template
//! lookups are cached with a fixed TTL, negative results included, so a
//! hot pSEO slug costs the backing store at most one round-trip per hour.
//! Last write wins; staleness inside the TTL is an accepted tradeoff.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::models::{KeywordRecord, TemplateRecord};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

pub struct SeoCache {
    keywords: RwLock<HashMap<String, (Instant, Option<KeywordRecord>)>>,
    templates: RwLock<HashMap<String, (Instant, Option<TemplateRecord>)>>,
    ttl: Duration,
}

impl SeoCache {
    pub fn new(ttl: Duration) -> Self {
        SeoCache {
            keywords: RwLock::new(HashMap::new()),
            templates: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Outer `None` = cache miss; inner `None` = cached "no record".
    pub fn get_keyword(&self, slug: &str) -> Option<Option<KeywordRecord>> {
        let map = self.keywords.read().ok()?;
        match map.get(slug) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put_keyword(&self, slug: &str, value: Option<KeywordRecord>) {
        if let Ok(mut map) = self.keywords.write() {
            map.insert(slug.to_string(), (Instant::now(), value));
        }
    }

    pub fn get_template(&self, kind: &str) -> Option<Option<TemplateRecord>> {
        let map = self.templates.read().ok()?;
        match map.get(kind) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put_template(&self, kind: &str, value: Option<TemplateRecord>) {
        if let Ok(mut map) = self.templates.write() {
            map.insert(kind.to_string(), (Instant::now(), value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(slug: &str) -> KeywordRecord {
        KeywordRecord {
            id: String::new(),
            slug: slug.to_string(),
            kind: "range".to_string(),
            params: serde_json::json!({"min": 1, "max": 10}),
            allow_indexing: true,
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = SeoCache::new(DEFAULT_TTL);
        assert!(cache.get_keyword("1-10").is_none());

        cache.put_keyword("1-10", Some(keyword("1-10")));
        let hit = cache.get_keyword("1-10").unwrap().unwrap();
        assert_eq!(hit.slug, "1-10");
    }

    #[test]
    fn test_negative_result_cached() {
        let cache = SeoCache::new(DEFAULT_TTL);
        cache.put_keyword("nope", None);
        // Hit, but the cached answer is "no record"
        assert_eq!(cache.get_keyword("nope"), Some(None));
    }

    #[test]
    fn test_expiry() {
        let cache = SeoCache::new(Duration::from_secs(0));
        cache.put_keyword("1-10", Some(keyword("1-10")));
        assert!(cache.get_keyword("1-10").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let cache = SeoCache::new(DEFAULT_TTL);
        cache.put_template("range", None);
        cache.put_template(
            "range",
            Some(TemplateRecord {
                kind: "range".to_string(),
                title_template: "t".to_string(),
                ..Default::default()
            }),
        );
        assert!(cache.get_template("range").unwrap().is_some());
    }
}
