//! World setup and the simulation loop.
//!
//! [`init_world`] inserts the resources, configures the layer matrix and
//! registers every observer. The `spawn_*` helpers build the two characters
//! and level geometry from the current [`GameConfig`]. [`Simulation`] owns
//! the frame and physics schedules and advances them in order.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, error, warn};

use crate::components::boxcollider::{BoxCollider, Obstacle};
use crate::components::camerapivot::CameraPivot;
use crate::components::capsulecollider::CapsuleCollider;
use crate::components::collisionlayer::{CollisionLayer, PhaseLayers};
use crate::components::controlintent::ControlIntent;
use crate::components::explorer::{Explorer, ExplorerMotion};
use crate::components::fear::Fear;
use crate::components::ghost::Ghost;
use crate::components::phasing::PhaseState;
use crate::components::position::Position;
use crate::components::possession::Possessor;
use crate::components::presentation::Presentation;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::input::ActionEvent;
use crate::resources::collisionlayers::{CollisionLayers, Layer};
use crate::resources::devices::ConnectedDevices;
use crate::resources::gameconfig::GameConfig;
use crate::resources::routing::InputRouting;
use crate::resources::systemsstore::{BIND_DEVICES, SystemsStore};
use crate::resources::worldtime::WorldTime;
use crate::systems::explorermovement::explorer_movement;
use crate::systems::fear::fear_system;
use crate::systems::gameconfig::apply_gameconfig_changes;
use crate::systems::ghostmovement::ghost_movement;
use crate::systems::input::route_action_event;
use crate::systems::look::look_system;
use crate::systems::phasing::phase_toggle_observer;
use crate::systems::possession::possession_toggle_observer;
use crate::systems::presentation::{
    phase_presentation_observer, possession_presentation_observer,
};
use crate::systems::routing::bind_player_devices;
use crate::systems::time::update_world_time;

/// Physics steps run at most this many times per frame; the rest of the
/// backlog is dropped.
pub const MAX_FIXED_STEPS_PER_FRAME: u32 = 16;

/// The three layers the level uses, resolved from the configured names.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLayers {
    pub default: Layer,
    pub ghost: Layer,
    pub phaseable_wall: Layer,
}

/// The two player characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actors {
    pub explorer: Entity,
    pub ghost: Entity,
}

/// Register the configured layers and set up the collision matrix: the ghost
/// layer passes through phaseable walls and collides with everything else.
pub fn setup_layers(config: &GameConfig) -> Result<(CollisionLayers, LevelLayers), String> {
    let mut layers = CollisionLayers::new();
    let mut ensure = |name: &str| {
        layers
            .ensure_layer(name)
            .ok_or_else(|| format!("No room for collision layer {:?}", name))
    };
    let level = LevelLayers {
        default: ensure(&config.default_layer_name)?,
        ghost: ensure(&config.ghost_layer_name)?,
        phaseable_wall: ensure(&config.phaseable_wall_layer_name)?,
    };
    if level.ghost == level.default || level.ghost == level.phaseable_wall {
        return Err(format!(
            "Ghost layer {:?} must differ from the default and phaseable wall layers",
            config.ghost_layer_name
        ));
    }
    layers.set_ignore(level.ghost, level.phaseable_wall, true);
    Ok((layers, level))
}

/// Build a world with every resource and observer in place.
pub fn init_world(config: GameConfig, devices: ConnectedDevices) -> Result<World, String> {
    let (layers, level) = setup_layers(&config)?;

    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_fixed_delta(config.fixed_timestep));
    world.insert_resource(layers);
    world.insert_resource(level);
    world.insert_resource(InputRouting::new());
    world.insert_resource(devices);
    world.insert_resource(config);

    world.spawn(Observer::new(route_action_event));
    world.spawn(Observer::new(phase_toggle_observer));
    world.spawn(Observer::new(possession_toggle_observer));
    world.spawn(Observer::new(phase_presentation_observer));
    world.spawn(Observer::new(possession_presentation_observer));

    let mut systems_store = SystemsStore::new();
    systems_store.insert(BIND_DEVICES, world.register_system(bind_player_devices));
    world.insert_resource(systems_store);

    world.flush();
    Ok(world)
}

pub fn spawn_explorer(world: &mut World, at: Vec3) -> Entity {
    let config = world.resource::<GameConfig>().clone();
    let level = *world.resource::<LevelLayers>();
    world
        .spawn((
            Explorer,
            Position { pos: at },
            Rotation::default(),
            CameraPivot::new(config.explorer_look_sensitivity),
            RigidBody::with_gravity(config.gravity),
            CapsuleCollider::default(),
            CollisionLayer(level.default),
            ControlIntent::default(),
            config.explorer_tuning(),
            ExplorerMotion::default(),
        ))
        .id()
}

/// Spawn a ghost that can possess `explorer`.
pub fn spawn_ghost(world: &mut World, at: Vec3, explorer: Entity) -> Entity {
    let config = world.resource::<GameConfig>().clone();
    let level = *world.resource::<LevelLayers>();
    world
        .spawn((
            Ghost,
            Position { pos: at },
            Rotation::default(),
            CameraPivot::new(config.ghost_look_sensitivity),
            RigidBody::new(),
            CapsuleCollider::default(),
            CollisionLayer(level.default),
            PhaseLayers {
                solid: level.default,
                phasing: level.ghost,
            },
            ControlIntent::default(),
            config.ghost_tuning(),
            Fear::new(config.ghost_fear, config.ghost_max_fear),
            PhaseState::Solid,
            Possessor::new(explorer, config.possession_tuning()),
            Presentation::default(),
        ))
        .id()
}

/// Spawn a static box of full `size` centred on `center`.
pub fn spawn_wall(world: &mut World, center: Vec3, size: Vec3, layer: Layer) -> Entity {
    world
        .spawn((
            Obstacle,
            Position { pos: center },
            BoxCollider::new(size.x, size.y, size.z),
            CollisionLayer(layer),
        ))
        .id()
}

/// A floor, one solid wall east of the origin, one phaseable wall north of
/// it, and both characters standing near the origin.
pub fn spawn_level(world: &mut World) -> Actors {
    let level = *world.resource::<LevelLayers>();
    spawn_wall(
        world,
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(40.0, 1.0, 40.0),
        level.default,
    );
    spawn_wall(
        world,
        Vec3::new(6.0, 2.0, 0.0),
        Vec3::new(1.0, 4.0, 10.0),
        level.default,
    );
    spawn_wall(
        world,
        Vec3::new(0.0, 2.0, 6.0),
        Vec3::new(10.0, 4.0, 1.0),
        level.phaseable_wall,
    );
    // Both stand on the floor top at y = 0; the ghost hovers half a unit up.
    let foot = CapsuleCollider::default().foot_offset();
    let explorer = spawn_explorer(world, Vec3::new(0.0, foot, 0.0));
    let ghost = spawn_ghost(world, Vec3::new(0.0, foot + 0.5, -3.0), explorer);
    Actors { explorer, ghost }
}

/// Run the registered device binding system.
pub fn bind_devices(world: &mut World) {
    let Some(id) = world
        .get_resource::<SystemsStore>()
        .and_then(|store| store.get(BIND_DEVICES))
    else {
        warn!("Device binding system is not registered");
        return;
    };
    if let Err(e) = world.run_system(id) {
        error!("Device binding failed to run: {}", e);
    }
}

/// Deliver one action event and apply whatever it queued.
pub fn send_action(world: &mut World, event: ActionEvent) {
    world.trigger(event);
    world.flush();
}

/// Frame and physics schedules plus the fixed-step accumulator.
///
/// Per frame: config apply, look, fear drain (in that order), then as many
/// physics steps as the accumulated time allows.
pub struct Simulation {
    frame: Schedule,
    fixed: Schedule,
    accumulator: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        let mut frame = Schedule::default();
        frame.add_systems((apply_gameconfig_changes, look_system, fear_system).chain());
        let mut fixed = Schedule::default();
        fixed.add_systems((ghost_movement, explorer_movement).chain());
        Self {
            frame,
            fixed,
            accumulator: 0.0,
        }
    }

    /// Advance by one frame of `dt` unscaled seconds. Returns the number of
    /// physics steps run.
    pub fn step(&mut self, world: &mut World, dt: f32) -> u32 {
        world.flush();
        update_world_time(world, dt);
        self.frame.run(world);

        let (delta, fixed_delta) = {
            let time = world.resource::<WorldTime>();
            (time.delta, time.fixed_delta)
        };
        let mut steps = 0;
        if fixed_delta > 0.0 {
            self.accumulator += delta;
            while self.accumulator >= fixed_delta && steps < MAX_FIXED_STEPS_PER_FRAME {
                self.fixed.run(world);
                self.accumulator -= fixed_delta;
                steps += 1;
            }
            if self.accumulator >= fixed_delta {
                debug!(
                    "Dropping {:.3}s of physics backlog",
                    self.accumulator - self.accumulator % fixed_delta
                );
                self.accumulator %= fixed_delta;
            }
        }
        world.clear_trackers();
        steps
    }
}
