//! The shared object group: inner solid shape + outer wire shape.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::constants::{
    color_from_hex, Colors, GROUP_HOME, GROUP_SMALL_SCALE, SHAPE_SPIN_RATE,
};
use crate::mesh::{dodecahedron, icosahedron, torus_knot, wireframe_of, Shading};

use super::core::ViewerSettings;
use super::UpdateSet;

pub struct ShapesPlugin;

#[derive(Component)]
pub(crate) struct MainGroup;

#[derive(Component)]
pub(crate) struct InnerShape;

#[derive(Component)]
pub(crate) struct OuterShape;

/// Mesh and material handles for every configuration the five views cycle
/// through, built once at startup.
#[derive(Resource)]
pub(crate) struct MeshBank {
    torus_smooth: Handle<Mesh>,
    ico_coarse: Handle<Mesh>,
    ico_fine: Handle<Mesh>,
    knot: Handle<Mesh>,
    torus_wire: Handle<Mesh>,
    dodec_wire: Handle<Mesh>,
    pub(crate) wire_material: Handle<StandardMaterial>,
}

impl MeshBank {
    /// Inner mesh for a view; `None` means the shape stays hidden.
    pub(crate) fn inner_for(&self, view: usize) -> Option<Handle<Mesh>> {
        match view {
            0 => Some(self.torus_smooth.clone()),
            1 => Some(self.ico_coarse.clone()),
            3 => Some(self.ico_fine.clone()),
            4 => Some(self.knot.clone()),
            _ => None,
        }
    }

    pub(crate) fn outer_for(&self, view: usize) -> Option<Handle<Mesh>> {
        match view {
            0 => Some(self.torus_wire.clone()),
            1 | 3 | 4 => Some(self.dodec_wire.clone()),
            _ => None,
        }
    }

    /// Bank with every slot pointing at the same placeholder assets, for
    /// tests that exercise transition wiring without a renderer.
    #[cfg(test)]
    pub(crate) fn test_stub(mesh: Handle<Mesh>, material: Handle<StandardMaterial>) -> Self {
        Self {
            torus_smooth: mesh.clone(),
            ico_coarse: mesh.clone(),
            ico_fine: mesh.clone(),
            knot: mesh.clone(),
            torus_wire: mesh.clone(),
            dodec_wire: mesh,
            wire_material: material,
        }
    }
}

impl Plugin for ShapesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_shapes)
            .add_systems(Update, spin_shapes.in_set(UpdateSet::Visuals))
            .add_systems(Update, rescale_group_on_resize.in_set(UpdateSet::Input));
    }
}

fn spawn_shapes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<ViewerSettings>,
    q_window: Query<&Window, With<PrimaryWindow>>,
) {
    let torus_smooth = meshes.add(Torus {
        minor_radius: 0.2,
        major_radius: 1.5,
    });
    let ico_coarse = meshes.add(icosahedron(1.0, 1, Shading::Flat));
    let ico_fine = meshes.add(icosahedron(1.5, 2, Shading::Flat));
    let knot = meshes.add(torus_knot(1.0, 0.15, 300, 20, 4, 3));

    let torus_wire_source = Mesh::from(Torus {
        minor_radius: 0.4,
        major_radius: 1.5,
    });
    let torus_wire = match wireframe_of(&torus_wire_source) {
        Some(mesh) => meshes.add(mesh),
        None => meshes.add(torus_wire_source),
    };
    let dodec_source = dodecahedron(2.0, 2, Shading::Smooth);
    let dodec_wire = match wireframe_of(&dodec_source) {
        Some(mesh) => meshes.add(mesh),
        None => meshes.add(dodec_source),
    };

    let inner_material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::INNER),
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let wire_material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::WIRE_LIGHT),
        unlit: true,
        cull_mode: None,
        ..default()
    });

    // Half-size group on small screens, applied at startup and on resize.
    let scale = match q_window.single() {
        Ok(window) if window.width() <= settings.config.small_screen_breakpoint => {
            Vec3::splat(GROUP_SMALL_SCALE)
        }
        _ => Vec3::ONE,
    };

    commands
        .spawn((
            Transform::from_translation(GROUP_HOME).with_scale(scale),
            Visibility::default(),
            MainGroup,
        ))
        .with_children(|group| {
            group.spawn((
                Mesh3d(torus_smooth.clone()),
                MeshMaterial3d(inner_material),
                Transform::default(),
                InnerShape,
            ));
            group.spawn((
                Mesh3d(torus_wire.clone()),
                MeshMaterial3d(wire_material.clone()),
                Transform::default(),
                OuterShape,
            ));
        });

    commands.insert_resource(MeshBank {
        torus_smooth,
        ico_coarse,
        ico_fine,
        knot,
        torus_wire,
        dodec_wire,
        wire_material,
    });
}

/// Continuous counter-rotation of the two shapes.
fn spin_shapes(
    time: Res<Time>,
    mut q_inner: Query<&mut Transform, (With<InnerShape>, Without<OuterShape>)>,
    mut q_outer: Query<&mut Transform, (With<OuterShape>, Without<InnerShape>)>,
) {
    let step = SHAPE_SPIN_RATE * time.delta_secs();
    for mut transform in &mut q_inner {
        transform.rotate_local_z(-step);
    }
    for mut transform in &mut q_outer {
        transform.rotate_local_z(step);
    }
}

/// Un-debounced resize path: rescale the group at the breakpoint. The
/// renderer and projection resize are the engine's own; this path never
/// touches the view state machine.
fn rescale_group_on_resize(
    mut resizes: MessageReader<WindowResized>,
    settings: Res<ViewerSettings>,
    mut q_group: Query<&mut Transform, With<MainGroup>>,
) {
    let Some(resized) = resizes.read().last() else {
        return;
    };
    let scale = if resized.width <= settings.config.small_screen_breakpoint {
        GROUP_SMALL_SCALE
    } else {
        1.0
    };
    for mut transform in &mut q_group {
        transform.scale = Vec3::splat(scale);
    }
}
