use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use clap::{Arg, Command};
use log::{info, warn};

mod handlers;
mod models;
mod services;
mod utils;

use handlers::{edge, generate, sitemap, tools, userdata};
use models::AppState;
use services::cache::SeoCache;
use services::store::StoreClient;
use services::template::{Shell, DEFAULT_SHELL};
use services::user_store::UserDataStore;

fn init_logging(log_file: Option<&String>) {
    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .expect("Failed to open log file");

        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(log_output)))
            .init();
    } else {
        env_logger::init();
    }
}

fn load_shell(path: &str) -> Shell {
    match std::fs::read_to_string(path) {
        Ok(html) => {
            info!("Loaded shell from {} ({} bytes)", path, html.len());
            Shell::new(html)
        }
        Err(e) => {
            warn!("Could not read shell at {}: {}. Using built-in shell.", path, e);
            Shell::new(DEFAULT_SHELL.to_string())
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let matches = Command::new("numgend")
        .version("0.1")
        .about("Random-value generator service with edge-rendered pSEO pages")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:8080")
                .help("Specify the listen address (e.g., 0.0.0.0:8080)"),
        )
        .arg(
            Arg::new("store-url")
                .long("store-url")
                .num_args(1)
                .help("Base URL of the backing record store (if omitted, runs store-less)"),
        )
        .arg(
            Arg::new("site-url")
                .long("site-url")
                .num_args(1)
                .default_value("https://numbergenerator.ai")
                .help("Public site origin used for canonical URLs"),
        )
        .arg(
            Arg::new("shell-file")
                .long("shell-file")
                .num_args(1)
                .default_value("./assets/shell.html")
                .help("Path to the HTML shell rewritten per page"),
        )
        .arg(
            Arg::new("asset-dir")
                .long("asset-dir")
                .num_args(1)
                .default_value("./assets")
                .help("Directory containing static assets"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .num_args(1)
                .default_value("./data")
                .help("Directory for persisted user data"),
        )
        .arg(
            Arg::new("cache-ttl-secs")
                .long("cache-ttl-secs")
                .num_args(1)
                .default_value("3600")
                .help("SEO lookup cache TTL in seconds"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .get_matches();

    let listen_host = matches
        .get_one::<String>("listen-host")
        .expect("listen-host argument must always have a default value")
        .clone();
    let store_url = matches.get_one::<String>("store-url").cloned();
    let site_url = matches
        .get_one::<String>("site-url")
        .expect("site-url argument must always have a default value")
        .trim_end_matches('/')
        .to_string();
    let shell_file = matches.get_one::<String>("shell-file").cloned().unwrap_or_default();
    let asset_dir = matches.get_one::<String>("asset-dir").cloned().unwrap_or_default();
    let data_dir = matches.get_one::<String>("data-dir").cloned().unwrap_or_default();
    let cache_ttl: u64 = matches
        .get_one::<String>("cache-ttl-secs")
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600);
    let log_file = matches.get_one::<String>("log-file");

    init_logging(log_file);

    let store = match &store_url {
        Some(url) => {
            info!("Using record store at {}", url);
            Some(StoreClient::new(url))
        }
        None => {
            warn!("No store configured; pSEO pages limited to numeric-range synthesis");
            None
        }
    };

    let state = AppState {
        shell: load_shell(&shell_file),
        store,
        cache: SeoCache::new(Duration::from_secs(cache_ttl)),
        users: UserDataStore::open(Some(PathBuf::from(&data_dir))),
        site_url,
        asset_dir,
    };
    let shared_state = web::Data::new(state);

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .service(generate::generate_post)
            .service(generate::generate_get)
            .service(tools::list_tools)
            .service(tools::get_tool)
            .service(userdata::list_favorites)
            .service(userdata::add_favorite)
            .service(userdata::remove_favorite)
            .service(userdata::list_recents)
            .service(userdata::add_recent)
            .service(userdata::clear_recents)
            .service(userdata::list_history)
            .service(userdata::add_history)
            .service(userdata::clear_history)
            .service(userdata::record_install_prompt)
            .service(userdata::consume_install_prompt)
            .service(sitemap::sitemap_pseo)
            .default_service(web::route().to(edge::render_page))
    })
    .bind(&listen_host)?
    .run()
    .await
}
