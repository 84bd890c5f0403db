use actix_web::{delete, get, post, web, HttpResponse, Responder};

use crate::models::{AppState, KeyQuery};
use crate::services::install_prompt;
use crate::services::validation::{validate_generation_result, validate_saved_item};

#[get("/api/userdata/favorites")]
pub async fn list_favorites(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.users.favorites())
}

#[post("/api/userdata/favorites")]
pub async fn add_favorite(data: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let Some(item) = validate_saved_item(&body) else {
        return HttpResponse::BadRequest().body("Invalid favorite payload");
    };
    if data.users.add_favorite(item) {
        HttpResponse::Ok().json(data.users.favorites())
    } else {
        HttpResponse::Conflict().body("Already favorited or list full")
    }
}

#[delete("/api/userdata/favorites")]
pub async fn remove_favorite(data: web::Data<AppState>, query: web::Query<KeyQuery>) -> impl Responder {
    if data.users.remove_favorite(&query.key) {
        HttpResponse::Ok().json(data.users.favorites())
    } else {
        HttpResponse::NotFound().body("Not a favorite")
    }
}

#[get("/api/userdata/recents")]
pub async fn list_recents(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.users.recents())
}

#[post("/api/userdata/recents")]
pub async fn add_recent(data: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let Some(item) = validate_saved_item(&body) else {
        return HttpResponse::BadRequest().body("Invalid recent payload");
    };
    data.users.add_recent(item);
    HttpResponse::Ok().json(data.users.recents())
}

#[delete("/api/userdata/recents")]
pub async fn clear_recents(data: web::Data<AppState>) -> impl Responder {
    data.users.clear_recents();
    HttpResponse::Ok().finish()
}

#[get("/api/userdata/history")]
pub async fn list_history(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.users.history())
}

/// Append a client-held generation result to the log. The payload is
/// re-validated; a result without values is rejected.
#[post("/api/userdata/history")]
pub async fn add_history(data: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    match validate_generation_result(&body) {
        Some(result) => {
            data.users.add_history(&result.formatted);
            HttpResponse::Ok().json(data.users.history())
        }
        None => HttpResponse::BadRequest().body("Invalid result payload"),
    }
}

#[delete("/api/userdata/history")]
pub async fn clear_history(data: web::Data<AppState>) -> impl Responder {
    data.users.clear_history();
    HttpResponse::Ok().finish()
}

#[post("/api/pwa/install-prompt")]
pub async fn record_install_prompt(body: web::Json<serde_json::Value>) -> impl Responder {
    install_prompt::record_prompt(body.into_inner());
    HttpResponse::Ok().finish()
}

/// Hand the deferred prompt back exactly once.
#[post("/api/pwa/install-prompt/consume")]
pub async fn consume_install_prompt() -> impl Responder {
    match install_prompt::take_prompt() {
        Some(payload) => HttpResponse::Ok().json(payload),
        None => HttpResponse::NotFound().body("No deferred prompt"),
    }
}
