//! Catch-all page handler: classifies each request path, resolves the
//! matching keyword record (cache, store, or a synthesized numeric-range
//! fallback), renders its SEO template, and serves a rewritten copy of the
//! in-memory shell. Unknown slugs fall through to the untouched shell so
//! the client router can show its own not-found state.

use std::path::Path;
use std::sync::LazyLock;

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, warn};
use regex::Regex;
use serde_json::json;

use crate::models::{AppState, KeywordRecord, TemplateRecord};
use crate::services::registry;
use crate::services::template::{render_placeholders, template_vars, PageSeo};

/// Bare `min-max` slugs that can be synthesized without a store record.
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,9})-(\d{1,9})$").unwrap());

#[derive(Debug, PartialEq)]
enum PageClass {
    Asset,
    Core,
    Dynamic,
}

fn classify(path: &str) -> PageClass {
    let slug = path.trim_matches('/');
    if slug.rsplit('/').next().is_some_and(|seg| seg.contains('.')) {
        PageClass::Asset
    } else if !slug.contains('/') && registry::is_core_slug(slug) {
        PageClass::Core
    } else {
        PageClass::Dynamic
    }
}

/// Default service for everything the API routes did not claim.
pub async fn render_page(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let path = req.path().to_string();
    match classify(&path) {
        PageClass::Asset => serve_asset(&data, &path),
        PageClass::Core => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(data.shell.raw().to_string()),
        PageClass::Dynamic => render_dynamic(&data, path.trim_matches('/')).await,
    }
}

async fn render_dynamic(data: &web::Data<AppState>, slug: &str) -> HttpResponse {
    let Some(record) = resolve_keyword(data, slug).await else {
        debug!("no keyword record for '{slug}', serving shell as-is");
        return HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(data.shell.raw().to_string());
    };

    let template = resolve_template(data, &record.kind).await;
    let vars = template_vars(&record.slug, &record.params);

    let title = render_placeholders(&template.title_template, &vars);
    let description = render_placeholders(&template.meta_desc, &vars);
    let content_top = render_placeholders(&template.content_top, &vars);
    let content_bottom = render_placeholders(&template.content_bottom, &vars);
    let robots = if record.allow_indexing {
        "index, follow"
    } else {
        "noindex, nofollow"
    };
    let canonical = format!("{}/{}", data.site_url, record.slug);

    // Full resolved page config, so the client hydrates without another
    // round-trip
    let config = json!({
        "slug": record.slug,
        "type": record.kind,
        "params": record.params,
        "title": title,
        "description": description,
        "robots": robots,
        "canonical": canonical,
        "content_top": content_top,
        "content_bottom": content_bottom,
    });
    let seo = PageSeo {
        title,
        description,
        robots: robots.to_string(),
        canonical,
        content_top,
        content_bottom,
        config,
    };

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(data.shell.rewrite(&seo))
}

/// Cache, then store, then synthesis. Synthesized records are cached and,
/// when a store is configured, written back without blocking the response.
async fn resolve_keyword(data: &web::Data<AppState>, slug: &str) -> Option<KeywordRecord> {
    if let Some(cached) = data.cache.get_keyword(slug) {
        return cached;
    }

    // Transient store failures must not be cached as "no record"
    let mut answer_is_definitive = true;
    if let Some(store) = &data.store {
        match store.fetch_keyword(slug).await {
            Ok(Some(record)) => {
                data.cache.put_keyword(slug, Some(record.clone()));
                return Some(record);
            }
            Ok(None) => {} // fall through to synthesis
            Err(e) => {
                warn!("keyword lookup for '{slug}' failed: {e}");
                answer_is_definitive = false;
            }
        }
    }

    let Some(caps) = NUMERIC_RE.captures(slug) else {
        if answer_is_definitive {
            data.cache.put_keyword(slug, None);
        }
        return None;
    };
    let min: i64 = caps[1].parse().ok()?;
    let max: i64 = caps[2].parse().ok()?;
    let record = registry::default_range_record(slug, min, max);
    data.cache.put_keyword(slug, Some(record.clone()));

    if let Some(store) = &data.store {
        let store = store.clone();
        let upsert = record.clone();
        actix_web::rt::spawn(async move {
            if let Err(e) = store.upsert_keyword(&upsert).await {
                warn!("could not persist synthesized keyword '{}': {e}", upsert.slug);
            }
        });
    }
    Some(record)
}

async fn resolve_template(data: &web::Data<AppState>, kind: &str) -> TemplateRecord {
    if let Some(cached) = data.cache.get_template(kind) {
        return cached.unwrap_or_else(|| registry::builtin_template(kind));
    }
    if let Some(store) = &data.store {
        match store.fetch_template(kind).await {
            Ok(found) => {
                data.cache.put_template(kind, found.clone());
                if let Some(template) = found {
                    return template;
                }
            }
            Err(e) => warn!("template lookup for '{kind}' failed: {e}"),
        }
    }
    registry::builtin_template(kind)
}

fn serve_asset(data: &web::Data<AppState>, path: &str) -> HttpResponse {
    let relative = path.trim_start_matches('/');
    if relative.split('/').any(|seg| seg == "..") {
        return HttpResponse::NotFound().finish();
    }
    let full = Path::new(&data.asset_dir).join(relative);
    match std::fs::read(&full) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(content_type_for(relative))
            .body(bytes),
        Err(_) => HttpResponse::NotFound().finish(),
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") | Some("webmanifest") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("xml") => "application/xml",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// Kept apart from the handler tests: importing actix's `test` module there
// would shadow the built-in `#[test]` attribute for this synchronous case.
#[cfg(test)]
mod classify_tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("/"), PageClass::Core);
        assert_eq!(classify("/dice-roller"), PageClass::Core);
        assert_eq!(classify("/app.js"), PageClass::Asset);
        assert_eq!(classify("/icons/logo.svg"), PageClass::Asset);
        assert_eq!(classify("/5-10"), PageClass::Dynamic);
        assert_eq!(classify("/lucky-numbers-for-pisces"), PageClass::Dynamic);
    }
}
