//! Transient 3x3 cube grid shown by the projects view.

use bevy::prelude::*;

use crate::constants::{
    color_from_hex, Colors, CUBE_COUNT, CUBE_EDGE, CUBE_GRID_X_SHIFT, CUBE_REMOVE_DURATION,
    CUBE_SPACING, CUBE_SPAWN_DELAY, CUBE_STAGGER, GROW_DURATION,
};

use super::tween::{Ease, Tween, TweenProperty};
use super::UpdateSet;

pub struct CubesPlugin;

#[derive(Component)]
pub(crate) struct TransientCube;

/// Live cube entities. Drained the moment destruction begins, so a
/// routine can never stack a second grid on top of a live one.
#[derive(Resource, Default)]
pub(crate) struct CubeRegistry {
    live: Vec<Entity>,
}

/// Delayed grid spawn, armed by the view-2 routine.
#[derive(Resource, Default)]
pub(crate) struct CubeSpawnTimer(Option<Timer>);

#[derive(Resource)]
struct CubeAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Grid slot for cube `index`: three columns across, three rows down,
/// shifted left of the group.
pub(crate) fn grid_target(index: usize) -> Vec3 {
    let row = (index / 3) as f32;
    let col = (index % 3) as f32;
    Vec3::new(
        (col - 1.0) * CUBE_SPACING + CUBE_GRID_X_SHIFT,
        (1.0 - row) * CUBE_SPACING,
        0.0,
    )
}

impl Plugin for CubesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeRegistry>()
            .init_resource::<CubeSpawnTimer>()
            .add_systems(Startup, setup_cube_assets)
            .add_systems(Update, tick_cube_spawn.in_set(UpdateSet::Animate));
    }
}

fn setup_cube_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(CubeAssets {
        mesh: meshes.add(Cuboid::new(CUBE_EDGE, CUBE_EDGE, CUBE_EDGE)),
        material: materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::CUBE),
            ..default()
        }),
    });
}

/// Begin destroying every live cube: shrink to zero scale, despawn on
/// completion. Also disarms a pending grid spawn; destruction supersedes
/// the transient tweens (they are never cancelled by the shared-channel
/// mechanism).
pub(crate) fn remove_cubes(
    commands: &mut Commands,
    registry: &mut CubeRegistry,
    spawn_timer: &mut CubeSpawnTimer,
) {
    spawn_timer.0 = None;
    for cube in registry.live.drain(..) {
        commands.spawn(Tween {
            ease: Ease::Power2InOut,
            despawn_target: true,
            ..Tween::to(
                cube,
                TweenProperty::Scale,
                Vec3::ZERO,
                CUBE_REMOVE_DURATION,
            )
        });
    }
}

/// Arm the delayed spawn; the grid appears once the inner/outer shrink
/// has settled.
pub(crate) fn schedule_cube_grid(spawn_timer: &mut CubeSpawnTimer) {
    spawn_timer.0 = Some(Timer::from_seconds(CUBE_SPAWN_DELAY, TimerMode::Once));
}

fn tick_cube_spawn(
    time: Res<Time>,
    mut commands: Commands,
    mut spawn_timer: ResMut<CubeSpawnTimer>,
    mut registry: ResMut<CubeRegistry>,
    assets: Res<CubeAssets>,
) {
    let Some(timer) = spawn_timer.0.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if !timer.just_finished() {
        return;
    }
    spawn_timer.0 = None;

    for i in 0..CUBE_COUNT {
        let cube = commands
            .spawn((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(Vec3::ZERO),
                TransientCube,
            ))
            .id();
        registry.live.push(cube);

        // Staggered entrance toward the grid slot.
        commands.spawn(Tween {
            ease: Ease::Power2Out,
            delay: i as f32 * CUBE_STAGGER,
            ..Tween::to(
                cube,
                TweenProperty::Translation,
                grid_target(i),
                GROW_DURATION,
            )
        });
    }
    debug!("cube grid spawned ({} cubes)", CUBE_COUNT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_targets_form_a_centered_three_by_three() {
        let targets: Vec<Vec3> = (0..CUBE_COUNT).map(grid_target).collect();

        assert_eq!(targets[0], Vec3::new(-3.0, 1.0, 0.0));
        assert_eq!(targets[4], Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(targets[8], Vec3::new(-1.0, -1.0, 0.0));

        // All nine slots are distinct.
        for a in 0..CUBE_COUNT {
            for b in (a + 1)..CUBE_COUNT {
                assert_ne!(targets[a], targets[b]);
            }
        }
    }

    #[test]
    fn grid_rows_descend_and_columns_advance() {
        for i in 0..CUBE_COUNT {
            let t = grid_target(i);
            assert_eq!(t.y, 1.0 - (i / 3) as f32 * CUBE_SPACING);
            assert_eq!(t.z, 0.0);
        }
    }
}
