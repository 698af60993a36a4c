//! Background particle cloud with drift and mouse parallax.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::{
    color_from_hex, Colors, PARALLAX_EASE_RATE, PARALLAX_GAIN, STAR_DRIFT_RATE, STAR_RADIUS,
    STAR_SPREAD,
};

use super::core::ViewerSettings;
use super::input::MouseParallax;
use super::UpdateSet;

pub struct StarfieldPlugin;

#[derive(Component, Default)]
struct StarField {
    /// Euler angles tracked separately; the parallax easing needs raw
    /// per-axis values, not the composed quaternion.
    angle_x: f32,
    angle_y: f32,
    angle_z: f32,
}

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_starfield)
            .add_systems(Update, animate_starfield.in_set(UpdateSet::Visuals));
    }
}

fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<ViewerSettings>,
) {
    let star_mesh = match Sphere::new(STAR_RADIUS).mesh().ico(1) {
        Ok(mesh) => meshes.add(mesh),
        Err(_) => meshes.add(Sphere::new(STAR_RADIUS).mesh().uv(8, 6)),
    };
    let star_material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::STAR),
        unlit: true,
        ..default()
    });

    let mut rng = ChaCha8Rng::seed_from_u64(settings.config.rng_seed);

    commands
        .spawn((Transform::default(), Visibility::default(), StarField::default()))
        .with_children(|field| {
            for _ in 0..settings.config.star_count {
                let position = Vec3::new(
                    rng.gen_range(-0.5..0.5) * STAR_SPREAD,
                    rng.gen_range(-0.5..0.5) * STAR_SPREAD,
                    rng.gen_range(-0.5..0.5) * STAR_SPREAD,
                );
                field.spawn((
                    Mesh3d(star_mesh.clone()),
                    MeshMaterial3d(star_material.clone()),
                    Transform::from_translation(position),
                ));
            }
        });

    info!("starfield: {} particles", settings.config.star_count);
}

fn animate_starfield(
    time: Res<Time>,
    parallax: Res<MouseParallax>,
    mut q_field: Query<(&mut StarField, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let ease = (PARALLAX_EASE_RATE * dt).min(1.0);

    for (mut field, mut transform) in &mut q_field {
        field.angle_z += STAR_DRIFT_RATE * dt;
        field.angle_x += STAR_DRIFT_RATE * dt;

        // Ease toward the cursor-driven target on x/y.
        field.angle_y += ease * (parallax.offset.x * PARALLAX_GAIN - field.angle_y);
        field.angle_x += ease * (parallax.offset.y * PARALLAX_GAIN - field.angle_x);

        transform.rotation =
            Quat::from_euler(EulerRot::XYZ, field.angle_x, field.angle_y, field.angle_z);
    }
}
