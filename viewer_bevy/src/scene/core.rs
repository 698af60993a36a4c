use bevy::prelude::*;

use portfolio_shared::config::ViewerConfig;

use crate::constants::{
    color_from_hex, Colors, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_HOME, CAMERA_NEAR,
};

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    /// External signal adapters (scroll, cursor, resize, sections).
    Input,
    /// View state machine: request dispatch and transition bookkeeping.
    Views,
    /// Tween advancement, pending swaps, cube grid timers.
    Animate,
    /// Continuous rotations, parallax, camera aim, HUD.
    Visuals,
}

pub struct CorePlugin {
    pub config: ViewerConfig,
}

#[derive(Resource)]
pub(crate) struct ViewerSettings {
    pub(crate) config: ViewerConfig,
}

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ViewerSettings {
            config: self.config.clone(),
        })
        .insert_resource(ClearColor(color_from_hex(Colors::BACKDROP)))
        // Ambient term doubles as a hemisphere-style fill.
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 150.0,
            ..default()
        })
        .configure_sets(
            Update,
            (
                UpdateSet::Input,
                UpdateSet::Views,
                UpdateSet::Animate,
                UpdateSet::Visuals,
            )
                .chain(),
        )
        .add_systems(Startup, (setup_camera, setup_lights))
        .add_systems(Update, aim_camera.in_set(UpdateSet::Visuals));
    }
}

fn setup_camera(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_HOME).looking_at(Vec3::ZERO, Vec3::Y),
        msaa,
        MainCamera,
    ));
}

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// The camera moves between per-view positions but always frames the
/// scene origin.
fn aim_camera(mut q_camera: Query<&mut Transform, With<MainCamera>>) {
    for mut transform in &mut q_camera {
        if transform.translation.length_squared() > 1.0e-6 {
            transform.look_at(Vec3::ZERO, Vec3::Y);
        }
    }
}
