mod api;
mod app;
mod components;
pub mod config;
pub mod filter;
pub mod models;
pub mod render;
pub mod services;
pub mod summary;
mod utils;

use wasm_bindgen::prelude::*;

use app::App;
use config::Config;
use services::preferences::PreferenceStore;
use services::storage::{LocalStorage, MemoryStorage, StorageBackend};

#[wasm_bindgen(start)]
pub fn run_app() {
    utils::set_panic_hook();
    utils::init_logging();

    let config = Config::default();
    let storage: Box<dyn StorageBackend> = if LocalStorage::is_available() {
        Box::new(LocalStorage)
    } else {
        log::warn!("localStorage unavailable, preferences will not survive a reload");
        Box::new(MemoryStorage::new())
    };

    let mut store = PreferenceStore::new(storage, config.storage_key.clone());
    if let Some(legacy) = &config.legacy_key {
        store = store.with_legacy_key(legacy.clone());
    }

    let app = App::new(store, config);
    api::install(app.clone());
    if let Err(e) = app.start() {
        log::warn!("Could not start preference binder: {:#}", e);
    }
}
