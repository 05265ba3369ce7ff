/*
Hero banner window: floating glyphs, word labels and dashed links.
Config: assets/config/banner.ron (embedded copy used on wasm or when the file is unreadable)
Font: assets/fonts/DejaVuSans.ttf (embedded), `font_path` overrides it
*/

use std::sync::OnceLock;

use glyphfield::modules::config::{BannerConfig, EMBEDDED_FONT};
use glyphfield::modules::render::{self, HostMetrics};
use glyphfield::modules::scene::{FrameInput, Scene};
use macroquad::logging::{info, warn};
use macroquad::miniquad::date;
use macroquad::prelude::*;

const CONFIG_PATH: &str = "assets/config/banner.ron";

// window_conf runs before main; both read the same load
static CONFIG: OnceLock<(BannerConfig, Option<anyhow::Error>)> = OnceLock::new();

/// Disk config on native builds, the embedded one on wasm. Read once.
fn load_config() -> &'static (BannerConfig, Option<anyhow::Error>) {
    CONFIG.get_or_init(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            BannerConfig::load_or_default(CONFIG_PATH)
        }

        #[cfg(target_arch = "wasm32")]
        {
            (BannerConfig::embedded(), None)
        }
    })
}

/// Set up window settings before the app runs
fn window_conf() -> Conf {
    let cfg = &load_config().0;
    Conf {
        window_title: cfg.window.title.clone(),
        window_width: cfg.window.width,
        window_height: cfg.window.height,
        fullscreen: false,
        high_dpi: true,
        window_resizable: true,
        sample_count: 4, // MSAA
        ..Default::default()
    }
}

/// The configured TTF, else the bundled one, else macroquad's built-in font.
async fn load_font(path: Option<&str>) -> Option<Font> {
    if let Some(path) = path {
        match load_ttf_font(path).await {
            Ok(font) => return Some(font),
            Err(e) => warn!("font {}: {:?}; using bundled font", path, e),
        }
    }
    match load_ttf_font_from_bytes(EMBEDDED_FONT) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("bundled font: {:?}; using built-in font", e);
            None
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, load_error) = load_config();
    let config = config.clone();
    match load_error {
        Some(e) => warn!("{}: {:#}; using embedded config", CONFIG_PATH, e),
        None => info!("config loaded"),
    }
    for w in config.validate() {
        warn!("config: {}", w);
    }

    let font = load_font(config.font_path.as_deref()).await;

    rand::srand(date::now() as u64);

    let mut scene = Scene::new(config, screen_width(), screen_height(), &HostMetrics { font: font.as_ref() });

    // macroquad reports (0, 0) until the mouse first moves
    let mut last_mouse = mouse_position();
    let mut pointer_seen = false;

    loop {
        let metrics = HostMetrics { font: font.as_ref() };

        // No resize callback: compare against the canvas every frame
        scene.resize(screen_width(), screen_height(), &metrics);

        let mouse = mouse_position();
        let pressed = is_mouse_button_pressed(MouseButton::Left);
        if mouse != last_mouse || pressed {
            pointer_seen = true;
            last_mouse = mouse;
        }
        let input = FrameInput {
            pointer: pointer_seen.then(|| vec2(mouse.0, mouse.1)),
            pressed,
        };

        scene.update(&input, &metrics);
        render::draw_scene(&scene, font.as_ref(), get_time() * 1000.0);

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_and_scene_share_one_config_load() {
        let first = load_config();
        let conf = window_conf();
        assert!(std::ptr::eq(first, load_config()));
        assert_eq!(conf.window_title, first.0.window.title);
        assert_eq!(conf.window_width, first.0.window.width);
        assert!(first.1.is_none(), "{:?}", first.1);
    }
}
