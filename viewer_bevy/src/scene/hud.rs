//! Minimal overlay: active section label and scroll progress.

use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors, SECTIONS};

use super::input::ScrollState;
use super::transitions::ViewMachine;
use super::UpdateSet;

pub struct HudPlugin;

#[derive(Component)]
struct HudSectionText;

#[derive(Component)]
struct HudProgressText;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud.in_set(UpdateSet::Visuals));
    }
}

fn spawn_hud(mut commands: Commands) {
    let large = TextFont::from_font_size(18.0);
    let small = TextFont::from_font_size(12.0);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(16.0),
            ..default()
        },
        Text::new(SECTIONS[0].label),
        large,
        TextColor(color_from_hex(Colors::UI_TEXT)),
        HudSectionText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(14.0),
            ..default()
        },
        Text::new("0%"),
        small,
        TextColor(color_from_hex(Colors::UI_DIM)),
        HudProgressText,
    ));
}

fn update_hud(
    machine: Res<ViewMachine>,
    scroll: Res<ScrollState>,
    mut q_section: Query<&mut Text, (With<HudSectionText>, Without<HudProgressText>)>,
    mut q_progress: Query<&mut Text, (With<HudProgressText>, Without<HudSectionText>)>,
) {
    let label = SECTIONS[machine.switcher.active_view()].label;
    for mut text in &mut q_section {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }

    let percent = (scroll.fraction() * 100.0).round() as i64;
    for mut text in &mut q_progress {
        let next = format!("{}%", percent);
        if text.0 != next {
            text.0 = next;
        }
    }
}
