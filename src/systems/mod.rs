//! Gameplay systems and observers.
//!
//! Submodules overview
//! - [`abilities`] – phase and possession transitions shared by toggles and forced exits
//! - [`collision`] – obstacle snapshot for capsule queries
//! - [`explorermovement`] – explorer walk, sprint, jump and gravity per physics step
//! - [`fear`] – per-frame fear drain, regen and forced exits
//! - [`gameconfig`] – push changed tunables into live components
//! - [`ghostmovement`] – ghost flight per physics step
//! - [`input`] – route action events to the owning controller
//! - [`look`] – yaw the body and pitch the camera pivot
//! - [`phasing`] – phase enter/exit and the toggle observer
//! - [`possession`] – possession toggle observer
//! - [`presentation`] – opacity, visibility and camera reactions
//! - [`routing`] – one-shot startup device binding
//! - [`time`] – update simulation time and delta

pub mod abilities;
pub mod collision;
pub mod explorermovement;
pub mod fear;
pub mod gameconfig;
pub mod ghostmovement;
pub mod input;
pub mod look;
pub mod phasing;
pub mod possession;
pub mod presentation;
pub mod routing;
pub mod time;
