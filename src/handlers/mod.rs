pub mod edge;
pub mod generate;
pub mod sitemap;
pub mod tools;
pub mod userdata;

#[cfg(test)]
pub fn test_state() -> actix_web::web::Data<crate::models::AppState> {
    use crate::models::AppState;
    use crate::services::cache::{SeoCache, DEFAULT_TTL};
    use crate::services::template::{Shell, DEFAULT_SHELL};
    use crate::services::user_store::UserDataStore;

    actix_web::web::Data::new(AppState {
        shell: Shell::new(DEFAULT_SHELL.to_string()),
        store: None,
        cache: SeoCache::new(DEFAULT_TTL),
        users: UserDataStore::open(None),
        site_url: "https://numbergenerator.ai".to_string(),
        asset_dir: "./assets".to_string(),
    })
}
