//! Timed property tweens over `Transform` fields.
//!
//! Each tween lives on its own entity and drives one property (scale or
//! translation) of a target entity. The start value is captured when the
//! delay elapses, so a tween always departs from the live value even
//! after a cancellation. When a tween activates on a channel (target +
//! property) that an older tween is still driving, the older tween is
//! dropped, so sequenced shrink/grow pairs hand over cleanly.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use super::UpdateSet;

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TransitionStarted>()
            .add_message::<TransitionSettled>()
            .add_systems(Update, advance_tweens.in_set(UpdateSet::Animate));
    }
}

/// Sent the moment a tween flagged as a transition's irreversible first
/// step begins mutating its target. Consumed by the view-machine driver.
#[derive(Message, Clone, Copy)]
pub(crate) struct TransitionStarted;

/// Sent when a tween flagged as the logical end of a view transition
/// finishes. Consumed by the view-machine driver.
#[derive(Message, Clone, Copy)]
pub(crate) struct TransitionSettled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TweenProperty {
    Scale,
    Translation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ease {
    /// Quadratic ease-out, the engine default.
    Power1Out,
    /// Cubic ease-out.
    Power2Out,
    /// Cubic ease-in-out.
    Power2InOut,
}

impl Ease {
    pub(crate) fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Component)]
pub(crate) struct Tween {
    pub(crate) target: Entity,
    pub(crate) property: TweenProperty,
    pub(crate) to: Vec3,
    pub(crate) duration: f32,
    pub(crate) delay: f32,
    pub(crate) ease: Ease,
    /// Cancelled as a group when a new transition starts (camera
    /// translation and inner/outer scale ride this channel).
    pub(crate) shared: bool,
    /// Despawn the target entity once the tween completes (cube removal).
    pub(crate) despawn_target: bool,
    /// This tween is the irreversible first step of a view transition;
    /// its activation announces the transition start.
    pub(crate) starts_transition: bool,
    /// This tween is the logical end of the running view transition.
    pub(crate) settles_transition: bool,
    pub(crate) elapsed: f32,
    pub(crate) from: Option<Vec3>,
}

impl Tween {
    pub(crate) fn to(target: Entity, property: TweenProperty, to: Vec3, duration: f32) -> Self {
        Self {
            target,
            property,
            to,
            duration,
            delay: 0.0,
            ease: Ease::Power1Out,
            shared: false,
            despawn_target: false,
            starts_transition: false,
            settles_transition: false,
            elapsed: 0.0,
            from: None,
        }
    }
}

/// Despawn every shared-channel tween without firing its signals.
///
/// Transient cube tweens are not shared and survive; they are only
/// superseded by the cube destruction logic.
pub(crate) fn cancel_shared_tweens(commands: &mut Commands, tweens: &Query<(Entity, &Tween)>) {
    for (entity, tween) in tweens {
        if tween.shared {
            commands.entity(entity).despawn();
        }
    }
}

fn advance_tweens(
    time: Res<Time>,
    mut commands: Commands,
    mut q_tweens: Query<(Entity, &mut Tween)>,
    mut q_targets: Query<&mut Transform, Without<Tween>>,
    mut started: MessageWriter<TransitionStarted>,
    mut settled: MessageWriter<TransitionSettled>,
) {
    let dt = time.delta_secs();

    // Tick clocks, capture start values, note which tweens activated on
    // this frame and which were already running.
    let mut newly_active: Vec<(Entity, TweenProperty)> = Vec::new();
    let mut running: HashMap<(Entity, TweenProperty), Vec<Entity>> = HashMap::new();
    let mut dead: HashSet<Entity> = HashSet::new();

    for (entity, mut tween) in &mut q_tweens {
        let was_active = tween.from.is_some();
        tween.elapsed += dt;
        if tween.elapsed < tween.delay {
            continue;
        }
        if was_active {
            running
                .entry((tween.target, tween.property))
                .or_default()
                .push(entity);
            continue;
        }
        let Ok(transform) = q_targets.get(tween.target) else {
            // Target vanished before the tween started.
            dead.insert(entity);
            commands.entity(entity).despawn();
            continue;
        };
        tween.from = Some(match tween.property {
            TweenProperty::Scale => transform.scale,
            TweenProperty::Translation => transform.translation,
        });
        if tween.starts_transition {
            started.write(TransitionStarted);
        }
        newly_active.push((tween.target, tween.property));
    }

    // A fresh tween takes over its channel from older ones.
    for key in &newly_active {
        if let Some(stale) = running.get(&(key.0, key.1)) {
            for entity in stale {
                dead.insert(*entity);
                commands.entity(*entity).despawn();
            }
        }
    }

    for (entity, tween) in &mut q_tweens {
        if dead.contains(&entity) {
            continue;
        }
        let Some(from) = tween.from else {
            continue;
        };

        let t = if tween.duration > 0.0 {
            ((tween.elapsed - tween.delay) / tween.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let value = from.lerp(tween.to, tween.ease.apply(t));

        if let Ok(mut transform) = q_targets.get_mut(tween.target) {
            match tween.property {
                TweenProperty::Scale => transform.scale = value,
                TweenProperty::Translation => transform.translation = value,
            }
        }

        if t >= 1.0 {
            if tween.settles_transition {
                settled.write(TransitionSettled);
            }
            if tween.despawn_target {
                commands.entity(tween.target).despawn();
            }
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn make_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_message::<TransitionStarted>();
        app.add_message::<TransitionSettled>();
        app.add_systems(Update, advance_tweens);
        app
    }

    fn step(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn spawn_target(app: &mut App) -> Entity {
        app.world_mut().spawn(Transform::default()).id()
    }

    fn scale_of(app: &mut App, entity: Entity) -> Vec3 {
        app.world().get::<Transform>(entity).unwrap().scale
    }

    #[test]
    fn tween_reaches_its_target_and_despawns() {
        let mut app = make_test_app();
        let target = spawn_target(&mut app);
        let tween = app
            .world_mut()
            .spawn(Tween::to(target, TweenProperty::Scale, Vec3::ZERO, 0.4))
            .id();

        step(&mut app, 0.2);
        let mid = scale_of(&mut app, target);
        assert!(mid.x < 1.0 && mid.x > 0.0);

        step(&mut app, 0.3);
        assert_eq!(scale_of(&mut app, target), Vec3::ZERO);
        assert!(app.world().get::<Tween>(tween).is_none());
    }

    #[test]
    fn delayed_tween_takes_over_from_the_running_one() {
        let mut app = make_test_app();
        let target = spawn_target(&mut app);

        // Shrink immediately, grow back after a quarter second: the grow
        // must win once its delay elapses.
        app.world_mut()
            .spawn(Tween::to(target, TweenProperty::Scale, Vec3::ZERO, 0.4));
        app.world_mut().spawn(Tween {
            delay: 0.25,
            ..Tween::to(target, TweenProperty::Scale, Vec3::ONE, 0.4)
        });

        for _ in 0..12 {
            step(&mut app, 0.1);
        }
        assert_eq!(scale_of(&mut app, target), Vec3::ONE);
    }

    #[test]
    fn settle_flag_emits_a_message_on_completion() {
        let mut app = make_test_app();
        let target = spawn_target(&mut app);
        app.world_mut().spawn(Tween {
            settles_transition: true,
            ..Tween::to(target, TweenProperty::Scale, Vec3::ZERO, 0.1)
        });

        step(&mut app, 0.2);
        let settled: Vec<TransitionSettled> = app
            .world_mut()
            .resource_mut::<Messages<TransitionSettled>>()
            .drain()
            .collect();
        assert_eq!(settled.len(), 1);
    }

    #[test]
    fn despawn_target_removes_the_entity_after_the_tween() {
        let mut app = make_test_app();
        let target = spawn_target(&mut app);
        app.world_mut().spawn(Tween {
            despawn_target: true,
            ..Tween::to(target, TweenProperty::Scale, Vec3::ZERO, 0.1)
        });

        step(&mut app, 0.2);
        assert!(app.world().get::<Transform>(target).is_none());
    }

    #[test]
    fn cancelling_shared_tweens_spares_transient_ones() {
        let mut app = make_test_app();
        let target = spawn_target(&mut app);
        app.world_mut().spawn(Tween {
            shared: true,
            settles_transition: true,
            ..Tween::to(target, TweenProperty::Scale, Vec3::ZERO, 0.1)
        });
        app.world_mut().spawn(Tween::to(
            target,
            TweenProperty::Translation,
            Vec3::X,
            0.1,
        ));

        app.world_mut()
            .run_system_once(
                |mut commands: Commands, tweens: Query<(Entity, &Tween)>| {
                    cancel_shared_tweens(&mut commands, &tweens);
                },
            )
            .unwrap();

        step(&mut app, 0.2);

        // The cancelled shared tween never fired its signal; the
        // transient translation tween still ran.
        let settled: Vec<TransitionSettled> = app
            .world_mut()
            .resource_mut::<Messages<TransitionSettled>>()
            .drain()
            .collect();
        assert!(settled.is_empty());
        let transform = app.world().get::<Transform>(target).unwrap();
        assert_eq!(transform.translation, Vec3::X);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn eases_pin_the_endpoints() {
        for ease in [Ease::Power1Out, Ease::Power2Out, Ease::Power2InOut] {
            assert!(ease.apply(0.0).abs() < 1e-6);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn eases_are_monotonic() {
        for ease in [Ease::Power1Out, Ease::Power2Out, Ease::Power2InOut] {
            let mut prev = 0.0;
            for step in 1..=100 {
                let v = ease.apply(step as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{:?} dipped at step {}", ease, step);
                prev = v;
            }
        }
    }

    #[test]
    fn ease_out_front_loads_the_motion() {
        assert!(Ease::Power1Out.apply(0.5) > 0.5);
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
    }

    #[test]
    fn in_out_is_symmetric_around_the_midpoint() {
        let e = Ease::Power2InOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        for step in 0..=50 {
            let t = step as f32 / 100.0;
            let lo = e.apply(t);
            let hi = e.apply(1.0 - t);
            assert!((lo + hi - 1.0).abs() < 1e-5);
        }
    }
}
