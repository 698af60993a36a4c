mod constants;
mod mesh;
mod scene;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use portfolio_shared::config::ViewerConfig;

use scene::{
    CorePlugin, CubesPlugin, HudPlugin, InputPlugin, SectionsPlugin, ShapesPlugin,
    StarfieldPlugin, TweenPlugin, ViewsPlugin,
};

fn main() {
    let config = config_from_env_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Portfolio Viewer".to_string(),
                resolution: WindowResolution::new(config.window_width, config.window_height),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin { config })
        .add_plugins(ShapesPlugin)
        .add_plugins(StarfieldPlugin)
        .add_plugins(TweenPlugin)
        .add_plugins(CubesPlugin)
        .add_plugins(ViewsPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(SectionsPlugin)
        .add_plugins(HudPlugin)
        .run();
}

/// Configuration comes from an optional JSON file named by
/// `PORTFOLIO_CONFIG`, with `PORTFOLIO_SEED` overriding the starfield
/// seed. Anything invalid falls back to defaults with a note on stderr.
fn config_from_env_or_default() -> ViewerConfig {
    let mut config = match std::env::var("PORTFOLIO_CONFIG") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(raw) => match ViewerConfig::from_json(&raw) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Invalid viewer config {}: {}; using defaults", path, e);
                    ViewerConfig::default()
                }
            },
            Err(e) => {
                eprintln!("Cannot read viewer config {}: {}; using defaults", path, e);
                ViewerConfig::default()
            }
        },
        Err(_) => ViewerConfig::default(),
    };

    if let Ok(seed) = std::env::var("PORTFOLIO_SEED") {
        match seed.parse() {
            Ok(seed) => config.rng_seed = seed,
            Err(_) => eprintln!("Ignoring non-numeric PORTFOLIO_SEED {:?}", seed),
        }
    }

    config
}
