use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::services::registry;

/// Summary listing of every registered tool, for nav and tool-index pages.
#[get("/api/tools")]
pub async fn list_tools() -> impl Responder {
    let summaries: Vec<_> = registry::all()
        .iter()
        .map(|tool| {
            json!({
                "slug": tool.slug,
                "title": tool.title,
                "description": tool.description,
                "mode": tool.mode,
                "category": tool.category,
                "priority": tool.priority,
            })
        })
        .collect();
    HttpResponse::Ok().json(summaries)
}

/// Full config for one tool, including default params, UI hints and FAQ.
#[get("/api/tools/{slug}")]
pub async fn get_tool(path: web::Path<String>) -> impl Responder {
    match registry::lookup(&path.into_inner()) {
        Some(tool) => HttpResponse::Ok().json(tool),
        None => HttpResponse::NotFound().body("Unknown tool"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_list_tools() {
        let app = test::init_service(App::new().service(list_tools)).await;
        let req = test::TestRequest::get().uri("/api/tools").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let tools = body.as_array().unwrap();
        assert!(tools.len() >= 10);
        assert!(tools.iter().any(|t| t["slug"] == "dice-roller"));
    }

    #[actix_web::test]
    async fn test_get_tool() {
        let app = test::init_service(App::new().service(get_tool)).await;

        let req = test::TestRequest::get()
            .uri("/api/tools/password-generator")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["mode"], "password");
        assert_eq!(body["params"]["length"], 16);

        let req = test::TestRequest::get()
            .uri("/api/tools/no-such-tool")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
