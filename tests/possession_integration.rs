//! Possession integration tests: guards, stream handover, fear drain and
//! forced exit, driven through routed gamepad events.

use approx::assert_abs_diff_eq;
use bevy_ecs::prelude::*;
use glam::Vec2;

use fearbound::components::controlintent::ControlIntent;
use fearbound::components::camerapivot::CameraPivot;
use fearbound::components::fear::Fear;
use fearbound::components::phasing::PhaseState;
use fearbound::components::position::Position;
use fearbound::components::possession::{PossessionState, Possessor};
use fearbound::components::presentation::Presentation;
use fearbound::components::rigidbody::RigidBody;
use fearbound::events::input::{ActionEvent, PlayerAction};
use fearbound::game::{
    Actors, Simulation, bind_devices, init_world, send_action, spawn_level,
};
use fearbound::resources::devices::ConnectedDevices;
use fearbound::resources::gameconfig::GameConfig;
use fearbound::resources::routing::{DeviceId, InputRouting, StreamOwner};
use fearbound::resources::worldtime::WorldTime;

const EXPLORER_PAD: DeviceId = DeviceId(0);
const GHOST_PAD: DeviceId = DeviceId(1);

fn setup(config: GameConfig) -> (World, Actors, Simulation) {
    let mut world = init_world(config, ConnectedDevices::simulated(2)).unwrap();
    let actors = spawn_level(&mut world);
    bind_devices(&mut world);
    (world, actors, Simulation::new())
}

fn scenario_config() -> GameConfig {
    GameConfig {
        ghost_fear: 100.0,
        required_fear: 50.0,
        possession_drain_rate: 10.0,
        ..GameConfig::new()
    }
}

fn press(world: &mut World, device: DeviceId, action: PlayerAction) {
    send_action(world, ActionEvent::pressed(device, action));
}

fn possessing(world: &World, ghost: Entity) -> bool {
    world.get::<Possessor>(ghost).unwrap().is_possessing()
}

fn fear(world: &World, ghost: Entity) -> f32 {
    world.get::<Fear>(ghost).unwrap().value()
}

fn assert_streams_at_home(world: &World, actors: Actors) {
    let routing = world.resource::<InputRouting>();
    let gs = routing.home_stream_of(actors.ghost).unwrap();
    let es = routing.home_stream_of(actors.explorer).unwrap();
    assert_eq!(routing.owner_of(gs), StreamOwner::Ghost(actors.ghost));
    assert_eq!(routing.owner_of(es), StreamOwner::Explorer(actors.explorer));
    assert!(routing.stream(gs).unwrap().enabled);
    assert!(routing.stream(es).unwrap().enabled);
}

#[test]
fn possession_drains_to_zero_and_ends_after_ten_seconds() {
    let (mut world, actors, mut sim) = setup(scenario_config());

    press(&mut world, GHOST_PAD, PlayerAction::Possess);
    assert!(possessing(&world, actors.ghost));
    assert_eq!(fear(&world, actors.ghost), 100.0);

    for _ in 0..19 {
        sim.step(&mut world, 0.5);
    }
    assert!(possessing(&world, actors.ghost));
    assert_eq!(fear(&world, actors.ghost), 5.0);

    sim.step(&mut world, 0.5);
    assert_eq!(world.resource::<WorldTime>().elapsed, 10.0);
    assert_eq!(fear(&world, actors.ghost), 0.0);
    assert!(!possessing(&world, actors.ghost));
    assert_streams_at_home(&world, actors);
    assert!(!world.get::<RigidBody>(actors.ghost).unwrap().frozen);
    assert!(world.get::<Presentation>(actors.ghost).unwrap().visible);
}

#[test]
fn entering_hands_the_ghost_stream_to_the_explorer() {
    let (mut world, actors, _sim) = setup(scenario_config());
    press(&mut world, GHOST_PAD, PlayerAction::Possess);

    let routing = world.resource::<InputRouting>();
    let gs = routing.home_stream_of(actors.ghost).unwrap();
    let es = routing.home_stream_of(actors.explorer).unwrap();
    assert_eq!(routing.owner_of(gs), StreamOwner::Explorer(actors.explorer));
    assert_eq!(routing.owner_of(es), StreamOwner::Unowned);
    assert!(!routing.stream(es).unwrap().enabled);
    assert_eq!(routing.streams_owned_by(actors.explorer), 1);
    assert_eq!(routing.streams_owned_by(actors.ghost), 0);

    assert!(world.get::<RigidBody>(actors.ghost).unwrap().frozen);
    assert!(!world.get::<Presentation>(actors.ghost).unwrap().visible);
    assert!(!world.get::<CameraPivot>(actors.ghost).unwrap().enabled);
}

#[test]
fn insufficient_fear_leaves_everything_unchanged() {
    let config = GameConfig {
        ghost_fear: 49.0,
        ..scenario_config()
    };
    let (mut world, actors, _sim) = setup(config);

    press(&mut world, GHOST_PAD, PlayerAction::Possess);

    assert_eq!(
        world.get::<Possessor>(actors.ghost).unwrap().state,
        PossessionState::Unpossessed
    );
    assert_eq!(fear(&world, actors.ghost), 49.0);
    assert_streams_at_home(&world, actors);
}

#[test]
fn out_of_range_is_rejected_until_the_ghost_comes_closer() {
    let config = GameConfig {
        possession_radius: Some(2.0),
        ..scenario_config()
    };
    let (mut world, actors, _sim) = setup(config);

    press(&mut world, GHOST_PAD, PlayerAction::Possess);
    assert!(!possessing(&world, actors.ghost));
    assert_eq!(fear(&world, actors.ghost), 100.0);

    world.get_mut::<Position>(actors.ghost).unwrap().pos.z = -1.0;
    press(&mut world, GHOST_PAD, PlayerAction::Possess);
    assert!(possessing(&world, actors.ghost));
}

#[test]
fn ghost_stream_is_owned_at_every_tick() {
    let (mut world, actors, mut sim) = setup(scenario_config());
    let gs = world
        .resource::<InputRouting>()
        .home_stream_of(actors.ghost)
        .unwrap();

    for tick in 0..40 {
        if tick % 7 == 0 {
            press(&mut world, GHOST_PAD, PlayerAction::Possess);
        }
        sim.step(&mut world, 0.25);
        let routing = world.resource::<InputRouting>();
        let owner = routing.owner_of(gs);
        assert!(owner.is_owned(), "ghost stream unowned at tick {tick}");
        let expected = if possessing(&world, actors.ghost) {
            StreamOwner::Explorer(actors.explorer)
        } else {
            StreamOwner::Ghost(actors.ghost)
        };
        assert_eq!(owner, expected, "wrong owner at tick {tick}");
        assert!(routing.streams_owned_by(actors.explorer) <= 1);
    }
}

#[test]
fn possession_at_threshold_ends_within_threshold_over_rate_ticks() {
    let config = GameConfig {
        ghost_fear: 50.0,
        ..scenario_config()
    };
    let (mut world, actors, mut sim) = setup(config);
    press(&mut world, GHOST_PAD, PlayerAction::Possess);
    assert!(possessing(&world, actors.ghost));

    // 50 fear at 10 per second, one-second ticks.
    let bound = (50.0f32 / 10.0).ceil() as u32;
    let mut ticks = 0;
    while possessing(&world, actors.ghost) {
        sim.step(&mut world, 1.0);
        ticks += 1;
        assert!(ticks <= bound, "still possessing after {ticks} ticks");
    }
    assert_streams_at_home(&world, actors);
}

#[test]
fn ghost_pad_drives_the_explorer_while_possessing() {
    let (mut world, actors, mut sim) = setup(scenario_config());
    sim.step(&mut world, 0.02);
    press(&mut world, GHOST_PAD, PlayerAction::Possess);

    send_action(
        &mut world,
        ActionEvent::stick(GHOST_PAD, PlayerAction::Movement, Vec2::Y),
    );
    // The explorer's own pad is parked.
    send_action(
        &mut world,
        ActionEvent::stick(EXPLORER_PAD, PlayerAction::Movement, Vec2::X),
    );

    assert_eq!(
        world.get::<ControlIntent>(actors.explorer).unwrap().movement,
        Vec2::Y
    );
    assert_eq!(
        world.get::<ControlIntent>(actors.ghost).unwrap().movement,
        Vec2::ZERO
    );

    let ghost_before = world.get::<Position>(actors.ghost).unwrap().pos;
    let explorer_before = world.get::<Position>(actors.explorer).unwrap().pos;
    for _ in 0..5 {
        sim.step(&mut world, 0.02);
    }
    let explorer_after = world.get::<Position>(actors.explorer).unwrap().pos;
    assert!(explorer_after.z > explorer_before.z + 0.3);
    assert_eq!(explorer_after.x, explorer_before.x);
    assert_eq!(world.get::<Position>(actors.ghost).unwrap().pos, ghost_before);
}

#[test]
fn possess_button_ends_a_possession() {
    let (mut world, actors, _sim) = setup(scenario_config());
    press(&mut world, GHOST_PAD, PlayerAction::Possess);
    send_action(
        &mut world,
        ActionEvent::stick(GHOST_PAD, PlayerAction::Movement, Vec2::Y),
    );

    press(&mut world, GHOST_PAD, PlayerAction::Possess);

    assert!(!possessing(&world, actors.ghost));
    assert_streams_at_home(&world, actors);
    assert_eq!(
        *world.get::<ControlIntent>(actors.explorer).unwrap(),
        ControlIntent::default()
    );
    assert!(world.get::<CameraPivot>(actors.ghost).unwrap().enabled);
    assert_eq!(fear(&world, actors.ghost), 100.0);
}

#[test]
fn explorer_pad_cannot_trigger_possession() {
    let (mut world, actors, _sim) = setup(scenario_config());
    press(&mut world, EXPLORER_PAD, PlayerAction::Possess);
    assert!(!possessing(&world, actors.ghost));
}

#[test]
fn possessing_forces_the_ghost_out_of_phase() {
    let (mut world, actors, _sim) = setup(scenario_config());
    press(&mut world, GHOST_PAD, PlayerAction::PhaseToggle);
    assert_eq!(
        *world.get::<PhaseState>(actors.ghost).unwrap(),
        PhaseState::Phasing
    );

    press(&mut world, GHOST_PAD, PlayerAction::Possess);

    assert!(possessing(&world, actors.ghost));
    assert_eq!(
        *world.get::<PhaseState>(actors.ghost).unwrap(),
        PhaseState::Solid
    );
    assert_eq!(world.get::<Presentation>(actors.ghost).unwrap().alpha, 1.0);
}

#[test]
fn phase_toggle_is_ignored_while_possessing() {
    let (mut world, actors, _sim) = setup(scenario_config());
    press(&mut world, GHOST_PAD, PlayerAction::Possess);

    // The ghost pad now drives the explorer, which cannot phase.
    press(&mut world, GHOST_PAD, PlayerAction::PhaseToggle);

    assert_eq!(
        *world.get::<PhaseState>(actors.ghost).unwrap(),
        PhaseState::Solid
    );
    assert!(possessing(&world, actors.ghost));
}

/// Frames stepped at `dt` until possession ends, giving up after `limit`.
fn frames_until_released(
    world: &mut World,
    sim: &mut Simulation,
    ghost: Entity,
    dt: f32,
    limit: u32,
) -> u32 {
    let mut frames = 0;
    while possessing(world, ghost) && frames < limit {
        sim.step(world, dt);
        frames += 1;
    }
    frames
}

#[test]
fn auto_exit_lands_on_the_expected_frame_at_display_rates() {
    for (start_fear, fps) in [(100.0f32, 60u32), (100.0, 30), (50.0, 60), (50.0, 30)] {
        let config = GameConfig {
            ghost_fear: start_fear,
            ..scenario_config()
        };
        let (mut world, actors, mut sim) = setup(config);
        press(&mut world, GHOST_PAD, PlayerAction::Possess);
        assert!(possessing(&world, actors.ghost));

        let dt = 1.0 / fps as f32;
        let bound = (f64::from(start_fear) / (10.0 * f64::from(dt))).ceil() as u32;
        let frames = frames_until_released(&mut world, &mut sim, actors.ghost, dt, bound + 10);

        assert!(
            frames <= bound,
            "fear {start_fear} at {fps} fps released after {frames} frames, bound {bound}"
        );
        assert_eq!(frames, (start_fear / 10.0) as u32 * fps);
        assert_eq!(fear(&world, actors.ghost), 0.0);
        assert_streams_at_home(&world, actors);
    }
}

#[test]
fn ten_second_scenario_at_sixty_and_thirty_fps() {
    for fps in [60u32, 30] {
        let (mut world, actors, mut sim) = setup(scenario_config());
        press(&mut world, GHOST_PAD, PlayerAction::Possess);

        let dt = 1.0 / fps as f32;
        let frames = frames_until_released(&mut world, &mut sim, actors.ghost, dt, 20 * fps);

        assert_eq!(frames, 10 * fps);
        assert_abs_diff_eq!(world.resource::<WorldTime>().elapsed, 10.0, epsilon = 1e-3);
        assert!(!world.get::<RigidBody>(actors.ghost).unwrap().frozen);
        assert_streams_at_home(&world, actors);
    }
}
