use actix_web::{get, post, web, HttpResponse, Responder};
use log::debug;
use serde_json::Value;

use crate::models::{AppState, GenerateQuery, GeneratorMode, GeneratorParams};
use crate::services::generator;
use crate::services::validation::{safe_parse_and_validate, validate_generator_params};

/// Generate values for a mode. The body is parsed defensively: malformed
/// JSON or junk fields degrade to the mode's defaults instead of a 400,
/// so a result is always produced for a known mode.
#[post("/api/generate/{mode}")]
pub async fn generate_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<GenerateQuery>,
    body: web::Bytes,
) -> impl Responder {
    let mode = match GeneratorMode::parse(&path.into_inner()) {
        Some(m) => m,
        None => return HttpResponse::NotFound().body("Unknown generator mode"),
    };

    let raw = String::from_utf8_lossy(&body);
    let params = safe_parse_and_validate(
        &raw,
        validate_generator_params,
        GeneratorParams::default(),
    );

    let result = generator::generate(mode, &params);
    debug!("generated {} value(s) for mode {}", result.values.len(), mode.as_str());

    if query.save.unwrap_or(false) {
        data.users.add_history(&result.formatted);
    }
    HttpResponse::Ok().json(result)
}

/// GET variant for simple integrations: parameters come in as query-string
/// text and are coerced field by field.
#[get("/api/generate/{mode}")]
pub async fn generate_get(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let mode = match GeneratorMode::parse(&path.into_inner()) {
        Some(m) => m,
        None => return HttpResponse::NotFound().body("Unknown generator mode"),
    };

    let save = query
        .get("save")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let params = params_from_query(&query);
    let result = generator::generate(mode, &params);

    if save {
        data.users.add_history(&result.formatted);
    }
    HttpResponse::Ok().json(result)
}

/// Build a JSON object from query-string pairs, then reuse the one
/// validation path. Numbers and booleans are detected by parse; list
/// fields split on commas.
fn params_from_query(query: &std::collections::HashMap<String, String>) -> GeneratorParams {
    let mut obj = serde_json::Map::new();
    for (key, raw) in query {
        if key == "save" {
            continue;
        }
        let value = match key.as_str() {
            "items" | "dice_custom_faces" | "ticket_remaining" => Value::Array(
                raw.split(',')
                    .map(|s| Value::String(s.trim().to_string()))
                    .collect(),
            ),
            "weights" => Value::Array(
                raw.split(',')
                    .filter_map(|s| s.trim().parse::<f64>().ok())
                    .filter_map(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .collect(),
            ),
            _ => coerce_scalar(raw),
        };
        obj.insert(key.clone(), value);
    }
    validate_generator_params(&Value::Object(obj)).unwrap_or_default()
}

fn coerce_scalar(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_generate_range_post() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(generate_post),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate/range")
            .set_json(json!({"min": 5, "max": 5}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["values"][0], 5);
    }

    #[actix_web::test]
    async fn test_generate_unknown_mode_404() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(generate_post),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate/tarot")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_generate_malformed_body_uses_defaults() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(generate_post),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate/coin")
            .set_payload("{definitely not json")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let flip = body["values"][0].as_str().unwrap();
        assert!(flip == "Heads" || flip == "Tails");
    }

    #[actix_web::test]
    async fn test_generate_get_coerces_query() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .service(generate_get),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/generate/list?items=red,green,blue&count=2&unique=true")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let values = body["values"].as_array().unwrap();
        assert_eq!(values.len(), 2);
        assert_ne!(values[0], values[1]);
    }

    #[actix_web::test]
    async fn test_save_appends_history() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(generate_post),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate/range?save=true")
            .set_json(json!({"min": 1, "max": 1}))
            .to_request();
        let _: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(state.users.history(), vec!["1".to_string()]);
    }
}
