//! Scroll and cursor input over a virtual five-section page.
//!
//! The viewer has no document to scroll, so wheel and keyboard input move
//! a virtual offset across five viewport-height sections. The throttled
//! sampler maps the scroll fraction into view buckets and funnels bucket
//! changes into the state machine.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};

use portfolio_shared::scroll::{scroll_bucket, SampleThrottle};

use crate::constants::VIEW_COUNT;

use super::core::ViewerSettings;
use super::transitions::ViewRequest;
use super::UpdateSet;

pub struct InputPlugin;

/// Pixels per wheel line, the browser convention.
const LINE_SCROLL_PX: f32 = 40.0;
const ARROW_SCROLL_PX: f32 = 60.0;
/// Page keys move most of a viewport, leaving some overlap.
const PAGE_FRACTION: f32 = 0.9;

/// Cursor offset from the window center, in logical pixels.
#[derive(Resource, Default)]
pub(crate) struct MouseParallax {
    pub(crate) offset: Vec2,
}

#[derive(Resource)]
pub(crate) struct ScrollState {
    offset: f32,
    viewport_height: f32,
    throttle: SampleThrottle,
    last_bucket: Option<usize>,
}

impl FromWorld for ScrollState {
    fn from_world(world: &mut World) -> Self {
        let settings = world.resource::<ViewerSettings>();
        Self {
            offset: 0.0,
            viewport_height: settings.config.window_height as f32,
            throttle: SampleThrottle::new(settings.config.scroll_throttle_secs),
            last_bucket: None,
        }
    }
}

impl ScrollState {
    /// Total scrollable range: five stacked sections minus one viewport.
    fn max_offset(&self) -> f32 {
        self.viewport_height * (VIEW_COUNT as f32 - 1.0)
    }

    pub(crate) fn offset(&self) -> f32 {
        self.offset
    }

    pub(crate) fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub(crate) fn fraction(&self) -> f64 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (self.offset / max).clamp(0.0, 1.0) as f64
    }
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MouseParallax>()
            .init_resource::<ScrollState>()
            .add_systems(
                Update,
                (track_cursor, apply_scroll_input, sample_scroll)
                    .chain()
                    .in_set(UpdateSet::Input),
            );
    }
}

fn track_cursor(
    mut moves: MessageReader<CursorMoved>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut parallax: ResMut<MouseParallax>,
) {
    let Some(moved) = moves.read().last() else {
        return;
    };
    let Ok(window) = q_window.single() else {
        return;
    };
    parallax.offset = Vec2::new(
        moved.position.x - window.width() / 2.0,
        moved.position.y - window.height() / 2.0,
    );
}

fn apply_scroll_input(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut scroll: ResMut<ScrollState>,
) {
    if let Ok(window) = q_window.single() {
        if window.height() > 0.0 {
            scroll.viewport_height = window.height();
        }
    }

    let viewport = scroll.viewport_height;
    let max = scroll.max_offset();
    let mut offset = scroll.offset;

    for ev in wheel.read() {
        let step = match ev.unit {
            MouseScrollUnit::Line => ev.y * LINE_SCROLL_PX,
            MouseScrollUnit::Pixel => ev.y,
        };
        // Wheel-down is negative y and scrolls forward.
        offset -= step;
    }

    if keys.just_pressed(KeyCode::PageDown) {
        offset += viewport * PAGE_FRACTION;
    }
    if keys.just_pressed(KeyCode::PageUp) {
        offset -= viewport * PAGE_FRACTION;
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        offset += ARROW_SCROLL_PX;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        offset -= ARROW_SCROLL_PX;
    }
    if keys.just_pressed(KeyCode::Home) {
        offset = 0.0;
    }
    if keys.just_pressed(KeyCode::End) {
        offset = max;
    }

    scroll.offset = offset.clamp(0.0, max);
}

/// Throttled fraction-to-bucket sampling. Out-of-range buckets (a fully
/// scrolled page lands in bucket five) are dropped.
fn sample_scroll(
    time: Res<Time>,
    mut scroll: ResMut<ScrollState>,
    mut requests: MessageWriter<ViewRequest>,
) {
    if !scroll.throttle.ready(time.elapsed_secs_f64()) {
        return;
    }
    let Some(bucket) = scroll_bucket(scroll.fraction()) else {
        return;
    };
    if scroll.last_bucket == Some(bucket) {
        return;
    }
    scroll.last_bucket = Some(bucket);
    requests.write(ViewRequest::new(bucket));
}
