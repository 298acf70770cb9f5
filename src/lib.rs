//! Fearbound gameplay core.
//!
//! Exposes the ECS components, resources, systems and events of the
//! explorer/ghost game, the capsule collision queries they run on, and the
//! world setup used by the demo binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod physics;
pub mod replay;
pub mod resources;
pub mod systems;
