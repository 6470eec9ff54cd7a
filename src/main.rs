//! Planetes: a side-scrolling 2D platformer
//!
//! Window, input and frame pacing. The level simulation, saves and config
//! come from the `planetes` library.

mod frontend;

use frontend::{MacroquadCanvas, SpriteLibrary};
use macroquad::prelude::*;
use planetes::config::GameConfig;
use planetes::game::layout::screen_height;
use planetes::game::{EndReason, FrameOutcome, Level, LevelSettings};
use planetes::VERSION;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Planetes v{}", VERSION),
        // Resized once the level layout is known
        window_width: 1200,
        window_height: 704,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // Logging depends on the config, so report how it was loaded afterwards
    let loaded = GameConfig::load();
    let config = match &loaded {
        Ok((config, _)) => config.clone(),
        Err(_) => GameConfig::default(),
    };
    frontend::init_logging(&config.log_filter);
    match loaded {
        Ok((_, Some(path))) => info!("Loaded config from {}", path.display()),
        Ok((_, None)) => debug!("No config file found, using defaults"),
        Err(e) => warn!("{}; using default settings", e),
    }

    let mut saves = match frontend::open_save_service(&config) {
        Ok(saves) => saves,
        Err(e) => {
            error!("Cannot open save store: {}", e);
            return;
        }
    };
    let save = match saves.current_or_new(&config.player_name, config.level_index, &config.level_file) {
        Ok(save) => save,
        Err(e) => {
            error!("No level to play: {}", e);
            return;
        }
    };

    let sprites = SpriteLibrary::load(&config.assets_dir).await;
    let settings = LevelSettings::new(config.screen_width, save.level, Rc::new(sprites.animations()));
    let mut level = match Level::new(save.map.as_slice(), &settings) {
        Ok(level) => level,
        Err(e) => {
            error!("Cannot build level {}: {}", save.level, e);
            return;
        }
    };
    level.player_mut().score = save.score;
    request_new_screen_size(config.screen_width, screen_height(save.map.len()));

    let mut canvas = MacroquadCanvas::new(&sprites);
    let reason = loop {
        let frame_start = get_time();

        let outcome = level.update(frontend::read_input(), frame_start);
        saves.poll();

        clear_background(BLACK);
        level.render(&mut canvas);
        draw_text(&format!("Score: {}", level.score()), 16.0, 32.0, 32.0, WHITE);

        match outcome {
            FrameOutcome::Continue => {}
            FrameOutcome::SaveRequested => {
                let snapshot = level.current_save(&config.player_name, &save.created_at);
                if let Err(e) = saves.save(&snapshot) {
                    warn!("Local save failed: {}", e);
                }
            }
            FrameOutcome::LevelEnded(reason) => break reason,
        }

        frontend::limit_fps(frame_start, config.target_fps);
        next_frame().await;
    };

    match reason {
        EndReason::Quit => info!("Bye"),
        EndReason::Died => info!("Game over with score {}", level.score()),
    }

    // Give an in-flight upload its timeout before the process exits
    saves.wait();
}
