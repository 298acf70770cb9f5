//! ECS resources made available to systems.
//!
//! Overview
//! - `collisionlayers` – named layers and the layer-pair collision matrix
//! - `devices` – gamepads the host enumerated at startup
//! - `gameconfig` – gameplay tunables loaded from INI
//! - `routing` – action streams, their devices and their owners
//! - `systemsstore` – registry of one-shot systems by name
//! - `worldtime` – simulation time, frame delta and physics step
pub mod collisionlayers;
pub mod devices;
pub mod gameconfig;
pub mod routing;
pub mod systemsstore;
pub mod worldtime;
