//! Window-side glue
//!
//! Everything that needs macroquad: sprite loading, drawing, keyboard
//! mapping and frame pacing. The simulation itself lives in the library.

mod canvas;
mod keys;
mod sprites;

pub use canvas::MacroquadCanvas;
pub use keys::read_input;
pub use sprites::SpriteLibrary;

use macroquad::prelude::get_time;
use planetes::config::GameConfig;
use planetes::storage::{SaveService, StorageError};
use tracing_subscriber::EnvFilter;

/// Local store backing the save service on this platform
#[cfg(not(target_arch = "wasm32"))]
pub type Store = planetes::storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub type Store = planetes::storage::MemoryStore;

/// `RUST_LOG` wins over the configured filter
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_save_service(config: &GameConfig) -> Result<SaveService<Store>, StorageError> {
    use planetes::storage::RemoteSave;

    let store = Store::in_dir(&config.store_dir())?;
    tracing::info!("Local saves in {}", store.path().display());
    Ok(match &config.remote_save_url {
        Some(url) => SaveService::with_remote(store, RemoteSave::new(url.clone(), config.remote_timeout())),
        None => SaveService::local_only(store),
    })
}

#[cfg(target_arch = "wasm32")]
pub fn open_save_service(_config: &GameConfig) -> Result<SaveService<Store>, StorageError> {
    Ok(SaveService::local_only(Store::new()))
}

/// Hold the frame until `1 / target_fps` seconds have passed since `frame_start`
pub fn limit_fps(frame_start: f64, target_fps: u32) {
    if target_fps == 0 {
        return;
    }
    let target_frame_time = 1.0 / target_fps as f64;
    if get_time() - frame_start >= target_frame_time {
        return;
    }

    // Native: use sleep for bulk, then spin-wait for precision
    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002;
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    // WASM: the browser paces frames
}
