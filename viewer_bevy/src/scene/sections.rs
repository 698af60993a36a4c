//! Intersection adapter: observes the five virtual sections against the
//! viewport and requests the view a section declares when it crosses the
//! visibility threshold. Re-registration after a resize is debounced.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use portfolio_shared::sections::{parse_view_attr, stacked_bands, SectionBand};

use crate::constants::{SECTIONS, VIEW_COUNT};

use super::core::ViewerSettings;
use super::input::ScrollState;
use super::transitions::ViewRequest;
use super::UpdateSet;

pub struct SectionsPlugin;

#[derive(Resource)]
struct SectionObserver {
    bands: Vec<SectionBand>,
    /// Last observed visibility per section, for edge triggering.
    visible: Vec<bool>,
    debounce: Timer,
    resize_pending: bool,
}

impl FromWorld for SectionObserver {
    fn from_world(world: &mut World) -> Self {
        let settings = world.resource::<ViewerSettings>();
        Self {
            bands: stacked_bands(VIEW_COUNT, settings.config.window_height as f64),
            visible: vec![false; VIEW_COUNT],
            debounce: Timer::from_seconds(settings.config.resize_debounce_secs, TimerMode::Once),
            resize_pending: false,
        }
    }
}

impl Plugin for SectionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SectionObserver>().add_systems(
            Update,
            (watch_resize, reregister_after_quiet, observe_sections)
                .chain()
                .in_set(UpdateSet::Input),
        );
    }
}

fn watch_resize(mut resizes: MessageReader<WindowResized>, mut observer: ResMut<SectionObserver>) {
    if resizes.read().last().is_some() {
        observer.resize_pending = true;
        observer.debounce.reset();
    }
}

/// Debounced path: rebuild the observed bands once the window has been
/// quiet for the configured interval.
fn reregister_after_quiet(
    time: Res<Time>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut observer: ResMut<SectionObserver>,
) {
    if !observer.resize_pending {
        return;
    }
    observer.debounce.tick(time.delta());
    if !observer.debounce.just_finished() {
        return;
    }
    observer.resize_pending = false;

    let Ok(window) = q_window.single() else {
        return;
    };
    observer.bands = stacked_bands(VIEW_COUNT, window.height() as f64);
    // Fresh observation re-fires whatever is currently visible.
    observer.visible.fill(false);
    info!("sections re-registered at viewport height {}", window.height());
}

fn observe_sections(
    scroll: Res<ScrollState>,
    mut observer: ResMut<SectionObserver>,
    mut requests: MessageWriter<ViewRequest>,
) {
    let viewport_top = scroll.offset() as f64;
    let viewport_height = scroll.viewport_height() as f64;

    for i in 0..observer.bands.len() {
        let band = observer.bands[i];
        let visible = band.is_visible(viewport_top, viewport_height);
        if visible && !observer.visible[i] {
            // Sections declare their view as text; non-numeric
            // declarations are skipped.
            if let Some(view) = parse_view_attr(SECTIONS[i].view_attr) {
                requests.write(ViewRequest::new(view));
            }
        }
        observer.visible[i] = visible;
    }
}
