pub mod cache;
pub mod generator;
pub mod install_prompt;
pub mod registry;
pub mod rng;
pub mod store;
pub mod template;
pub mod user_store;
pub mod validation;
