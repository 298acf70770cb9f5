//! Event types exchanged between input routing, abilities and presentation.
//!
//! Events decouple the code that decides a transition from the code that
//! reacts to it. Requests flow in, change notifications flow out.
//!
//! Submodules:
//! - [`input`] – gamepad action events tagged with their source device
//! - [`phase`] – phase toggle requests and phase change notifications
//! - [`possession`] – possession toggle requests and change notifications
//!
//! See each submodule for concrete event data and semantics.
pub mod input;
pub mod phase;
pub mod possession;
