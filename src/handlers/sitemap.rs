use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use log::warn;

use crate::models::AppState;

const PER_PAGE: usize = 200;
const MAX_PAGES: usize = 20;

/// Sitemap of store-approved pSEO pages only. Core tool pages live in the
/// static sitemap shipped with the client; this one covers keyword records
/// the store has marked indexable.
#[get("/sitemap-pseo.xml")]
pub async fn sitemap_pseo(data: web::Data<AppState>) -> impl Responder {
    let mut slugs: Vec<String> = Vec::new();
    if let Some(store) = &data.store {
        for page in 1..=MAX_PAGES {
            match store.list_indexable(page, PER_PAGE).await {
                Ok(records) => {
                    let short = records.len() < PER_PAGE;
                    slugs.extend(records.into_iter().map(|r| r.slug));
                    if short {
                        break;
                    }
                }
                Err(e) => {
                    warn!("sitemap page {page} failed: {e}");
                    break;
                }
            }
        }
    }

    let lastmod = Utc::now().format("%Y-%m-%d");
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for slug in &slugs {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}/{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>0.6</priority>\n  </url>\n",
            data.site_url, slug, lastmod
        ));
    }
    xml.push_str("</urlset>\n");

    HttpResponse::Ok()
        .content_type("application/xml")
        .body(xml)
}
