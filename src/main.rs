//! Fearbound headless demo.
//!
//! Builds the test level, binds simulated gamepads and runs the simulation
//! for a number of frames, optionally replaying a JSON input script. State
//! transitions are logged; a summary is printed at the end.
//!
//! Startup sequence:
//! 1. Parse the command line and initialise logging
//! 2. Load `GameConfig` (defaults on error)
//! 3. Build the world, spawn the level and bind devices
//! 4. Step the simulation, feeding scripted actions frame by frame

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use fearbound::components::fear::Fear;
use fearbound::components::phasing::PhaseState;
use fearbound::components::position::Position;
use fearbound::components::possession::Possessor;
use fearbound::game::{Simulation, bind_devices, init_world, send_action, spawn_level};
use fearbound::replay::InputScript;
use fearbound::resources::devices::ConnectedDevices;
use fearbound::resources::gameconfig::GameConfig;

/// Fearbound: explorer and ghost, one gamepad each.
#[derive(Parser)]
#[command(version, about = "Headless run of the explorer/ghost possession game")]
struct Cli {
    /// INI file with gameplay tunables.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON input script to replay.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Frame duration in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Number of gamepads to pretend are connected.
    #[arg(long, default_value_t = 2)]
    devices: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using default tuning", e);
    }

    let script = match &cli.script {
        Some(path) => match InputScript::load(path) {
            Ok(script) => script,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => InputScript::default(),
    };

    let mut world = match init_world(config, ConnectedDevices::simulated(cli.devices)) {
        Ok(world) => world,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let actors = spawn_level(&mut world);
    bind_devices(&mut world);

    let mut simulation = Simulation::new();
    for frame in 0..cli.frames {
        for event in script.events_for_frame(frame) {
            send_action(&mut world, event);
        }
        simulation.step(&mut world, cli.dt);
    }

    let explorer = world.get::<Position>(actors.explorer).copied();
    let ghost = world.get::<Position>(actors.ghost).copied();
    let fear = world.get::<Fear>(actors.ghost).map(Fear::value);
    let phase = world.get::<PhaseState>(actors.ghost).copied();
    let possessing = world
        .get::<Possessor>(actors.ghost)
        .map(Possessor::is_possessing);
    info!(
        "After {} frames: explorer at {:?}, ghost at {:?}, fear {:?}, {:?}, possessing {:?}",
        cli.frames,
        explorer.map(|p| p.pos),
        ghost.map(|p| p.pos),
        fear,
        phase,
        possessing
    );
}
