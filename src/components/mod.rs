//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world: transforms, colliders, the ghost's abilities and the
//! per-controller input intent.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box collider and the obstacle marker
//! - [`camerapivot`] – child camera pitch, clamped, never applied to the body
//! - [`capsulecollider`] – upright capsule shape of both characters
//! - [`collisionlayer`] – current collision layer and the solid/phasing pair
//! - [`controlintent`] – movement and look input accumulated from a stream
//! - [`explorer`] – explorer marker, tunables and ground contact
//! - [`fear`] – bounded fear gauge
//! - [`ghost`] – ghost marker and tunables
//! - [`phasing`] – solid/phasing state and its transition table
//! - [`position`] – world-space position of an entity
//! - [`possession`] – possession state, target and tunables
//! - [`presentation`] – opacity and visibility for a renderer
//! - [`rigidbody`] – kinematic body with named forces and freeze flag
//! - [`rotation`] – body yaw in degrees

pub mod boxcollider;
pub mod camerapivot;
pub mod capsulecollider;
pub mod collisionlayer;
pub mod controlintent;
pub mod explorer;
pub mod fear;
pub mod ghost;
pub mod phasing;
pub mod position;
pub mod possession;
pub mod presentation;
pub mod rigidbody;
pub mod rotation;
