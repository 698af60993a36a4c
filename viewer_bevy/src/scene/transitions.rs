//! View transitions: the state-machine driver and the per-view routines.
//!
//! All external signals funnel into [`ViewRequest`] messages; the
//! dispatcher feeds them to the state machine and acts on its verdict.
//! Requests handed back by the machine (pending-slot re-submissions) sit
//! out one frame before re-entering the dispatcher.

use bevy::prelude::*;

use portfolio_shared::switcher::{SwitchAction, ViewSwitcher};

use crate::constants::{
    color_from_hex, CAMERA_DURATION, GROW_DURATION, SHRINK_DURATION, VIEWS,
};

use super::core::MainCamera;
use super::cubes::{remove_cubes, schedule_cube_grid, CubeRegistry, CubeSpawnTimer};
use super::shapes::{InnerShape, MainGroup, MeshBank, OuterShape};
use super::tween::{
    cancel_shared_tweens, TransitionSettled, TransitionStarted, Tween, TweenProperty,
};
use super::UpdateSet;

pub struct ViewsPlugin;

/// A view-switch request. Adapters send `preempt: false`; `preempt: true`
/// is reserved for the machine's own pending re-submissions, which may
/// interrupt a transition in flight.
#[derive(Message, Clone, Copy)]
pub(crate) struct ViewRequest {
    pub(crate) view: usize,
    pub(crate) preempt: bool,
}

impl ViewRequest {
    pub(crate) fn new(view: usize) -> Self {
        Self {
            view,
            preempt: false,
        }
    }
}

#[derive(Resource, Default)]
pub(crate) struct ViewMachine {
    pub(crate) switcher: ViewSwitcher,
}

/// Pending-slot re-submission parked for exactly one frame.
#[derive(Resource, Default)]
struct DeferredRequest(Option<ViewRequest>);

/// Scheduled geometry/material swap partway through a transition.
#[derive(Component)]
struct PendingSwap {
    timer: Timer,
    view: usize,
}

impl Plugin for ViewsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ViewRequest>()
            .init_resource::<ViewMachine>()
            .init_resource::<DeferredRequest>()
            .add_systems(
                Update,
                (
                    redispatch_deferred,
                    dispatch_view_requests,
                    observe_transition_starts,
                    settle_transitions,
                )
                    .chain()
                    .in_set(UpdateSet::Views),
            )
            .add_systems(Update, apply_pending_swaps.in_set(UpdateSet::Animate));
    }
}

fn redispatch_deferred(
    mut deferred: ResMut<DeferredRequest>,
    mut requests: MessageWriter<ViewRequest>,
) {
    if let Some(request) = deferred.0.take() {
        requests.write(request);
    }
}

fn dispatch_view_requests(
    mut commands: Commands,
    mut machine: ResMut<ViewMachine>,
    mut requests: MessageReader<ViewRequest>,
    q_tweens: Query<(Entity, &Tween)>,
    q_swaps: Query<Entity, With<PendingSwap>>,
    mut registry: ResMut<CubeRegistry>,
    mut spawn_timer: ResMut<CubeSpawnTimer>,
    q_camera: Query<Entity, With<MainCamera>>,
    q_inner: Query<Entity, With<InnerShape>>,
    q_outer: Query<Entity, With<OuterShape>>,
    mut q_group: Query<&mut Transform, With<MainGroup>>,
) {
    for request in requests.read() {
        let action = if request.preempt {
            machine.switcher.preempt_with(request.view)
        } else {
            machine.switcher.request_view(request.view)
        };
        let SwitchAction::Start(view) = action else {
            continue;
        };

        let (Ok(camera), Ok(inner), Ok(outer)) =
            (q_camera.single(), q_inner.single(), q_outer.single())
        else {
            continue;
        };

        // Two transitions must never fight over the same properties.
        cancel_shared_tweens(&mut commands, &q_tweens);
        for swap in &q_swaps {
            commands.entity(swap).despawn();
        }

        debug!("transition to view {}", view);
        run_routine(
            view,
            &mut commands,
            camera,
            inner,
            outer,
            &mut q_group,
            &mut registry,
            &mut spawn_timer,
        );
    }
}

/// The shrink tween has begun mutating shared state. A parked request is
/// handed back and re-enters on the next frame, where it may take over
/// from the transition in flight.
fn observe_transition_starts(
    mut started: MessageReader<TransitionStarted>,
    mut machine: ResMut<ViewMachine>,
    mut deferred: ResMut<DeferredRequest>,
) {
    if started.read().count() == 0 {
        return;
    }
    if let Some(pending) = machine.switcher.on_transition_start() {
        deferred.0 = Some(ViewRequest {
            view: pending,
            preempt: true,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn run_routine(
    view: usize,
    commands: &mut Commands,
    camera: Entity,
    inner: Entity,
    outer: Entity,
    q_group: &mut Query<&mut Transform, With<MainGroup>>,
    registry: &mut CubeRegistry,
    spawn_timer: &mut CubeSpawnTimer,
) {
    let spec = &VIEWS[view];

    // Cube destruction comes first everywhere: the grid view replaces any
    // live grid, every other view clears it.
    remove_cubes(commands, registry, spawn_timer);

    // Irreversible shrink of the inner shape; its first tick announces
    // the transition start.
    commands.spawn(Tween {
        shared: true,
        starts_transition: true,
        ..Tween::to(inner, TweenProperty::Scale, Vec3::ZERO, SHRINK_DURATION)
    });

    match view {
        // Both shapes stay hidden while the cube grid is up.
        2 => {
            commands.spawn(Tween {
                shared: true,
                ..Tween::to(outer, TweenProperty::Scale, Vec3::ZERO, GROW_DURATION)
            });
            schedule_cube_grid(spawn_timer);
        }
        // The outer shell swells before its geometry swaps.
        3 => {
            commands.spawn(Tween {
                shared: true,
                ..Tween::to(
                    outer,
                    TweenProperty::Scale,
                    Vec3::splat(1.5),
                    GROW_DURATION,
                )
            });
        }
        _ => {
            commands.spawn(Tween {
                shared: true,
                ..Tween::to(outer, TweenProperty::Scale, Vec3::ZERO, SHRINK_DURATION)
            });
        }
    }

    if view != 2 {
        // Swap geometry/material once the shrink has done its work, then
        // grow back.
        commands.spawn(PendingSwap {
            timer: Timer::from_seconds(spec.swap_delay, TimerMode::Once),
            view,
        });
        commands.spawn(Tween {
            delay: spec.swap_delay,
            shared: true,
            ..Tween::to(inner, TweenProperty::Scale, Vec3::ONE, GROW_DURATION)
        });
        if view < 2 {
            // For the torus and icosahedron views the outer grow is the
            // logically last step of the sequence.
            commands.spawn(Tween {
                delay: spec.swap_delay,
                shared: true,
                settles_transition: true,
                ..Tween::to(outer, TweenProperty::Scale, Vec3::ONE, SHRINK_DURATION)
            });
        }
    }

    commands.spawn(Tween {
        delay: spec.camera_delay,
        shared: true,
        settles_transition: view >= 2,
        ..Tween::to(
            camera,
            TweenProperty::Translation,
            spec.camera_target,
            CAMERA_DURATION,
        )
    });

    // Group repositioning is instantaneous, never tweened.
    if let Some(position) = spec.group_position {
        for mut transform in q_group.iter_mut() {
            transform.translation = position;
        }
    }
}

fn settle_transitions(
    mut settled: MessageReader<TransitionSettled>,
    mut machine: ResMut<ViewMachine>,
    mut deferred: ResMut<DeferredRequest>,
) {
    if settled.read().count() == 0 {
        return;
    }
    if let Some(pending) = machine.switcher.on_transition_end() {
        deferred.0 = Some(ViewRequest::new(pending));
    }
}

fn apply_pending_swaps(
    time: Res<Time>,
    mut commands: Commands,
    mut q_swaps: Query<(Entity, &mut PendingSwap)>,
    bank: Res<MeshBank>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q_inner: Query<&mut Mesh3d, (With<InnerShape>, Without<OuterShape>)>,
    mut q_outer: Query<&mut Mesh3d, (With<OuterShape>, Without<InnerShape>)>,
) {
    for (entity, mut swap) in &mut q_swaps {
        swap.timer.tick(time.delta());
        if !swap.timer.just_finished() {
            continue;
        }

        if let Some(handle) = bank.inner_for(swap.view) {
            for mut mesh in &mut q_inner {
                mesh.0 = handle.clone();
            }
        }
        if let Some(handle) = bank.outer_for(swap.view) {
            for mut mesh in &mut q_outer {
                mesh.0 = handle.clone();
            }
        }
        if let Some(material) = materials.get_mut(&bank.wire_material) {
            material.base_color = color_from_hex(VIEWS[swap.view].wire_color);
        }

        commands.entity(entity).despawn();
    }
}
