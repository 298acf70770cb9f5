//! Input routing: which controller owns which action stream.
//!
//! A stream is a logical action set bound to one or more physical devices.
//! Each stream records a single current [`StreamOwner`], so a stream can never
//! be driven by two controllers at once, and handing it to another controller
//! is one assignment. The stream also remembers its *home* owner (the
//! controller it was bound to at startup), which is how the possess button on
//! the ghost's gamepad keeps working while that gamepad drives the explorer.
//!
//! [`InputRouting::take_control`], [`InputRouting::assign_input`] and
//! [`InputRouting::release_control`] are the only operations that change
//! ownership.

use std::fmt;

use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Identifier of a physical input device (gamepad) as enumerated by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

/// Identifier of a logical action stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(pub u32);

/// The controller currently subscribed to a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StreamOwner {
    #[default]
    Unowned,
    Explorer(Entity),
    Ghost(Entity),
}

impl StreamOwner {
    pub fn entity(self) -> Option<Entity> {
        match self {
            StreamOwner::Unowned => None,
            StreamOwner::Explorer(e) | StreamOwner::Ghost(e) => Some(e),
        }
    }

    pub fn is_owned(self) -> bool {
        self != StreamOwner::Unowned
    }
}

/// A logical action set and its binding state.
#[derive(Clone, Debug)]
pub struct ActionStream {
    pub devices: SmallVec<[DeviceId; 2]>,
    /// Disabled streams drop every event from their devices.
    pub enabled: bool,
    pub owner: StreamOwner,
    /// Owner the stream was bound to at startup.
    pub home: StreamOwner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Fewer device sets than player slots were available.
    NotEnoughDevices { found: usize, required: usize },
    /// The stream id does not name a registered stream.
    UnknownStream(StreamId),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::NotEnoughDevices { found, required } => write!(
                f,
                "{required} gamepads are required (Explorer & Ghost), found {found}"
            ),
            RoutingError::UnknownStream(id) => write!(f, "no input stream registered as {id:?}"),
        }
    }
}

impl std::error::Error for RoutingError {}

/// Number of player slots bound at startup.
pub const PLAYER_SLOTS: usize = 2;

#[derive(Resource, Debug, Default)]
pub struct InputRouting {
    streams: FxHashMap<StreamId, ActionStream>,
    by_device: FxHashMap<DeviceId, StreamId>,
    next_id: u32,
}

impl InputRouting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a disabled, unowned stream for a set of devices.
    ///
    /// Devices already routed to another stream are moved to the new one.
    pub fn register_stream(&mut self, devices: &[DeviceId], home: StreamOwner) -> StreamId {
        let id = StreamId(self.next_id);
        self.next_id += 1;
        for device in devices {
            if let Some(old) = self.by_device.insert(*device, id) {
                if let Some(stream) = self.streams.get_mut(&old) {
                    stream.devices.retain(|d| d != device);
                }
            }
        }
        self.streams.insert(
            id,
            ActionStream {
                devices: devices.iter().copied().collect(),
                enabled: false,
                owner: StreamOwner::Unowned,
                home,
            },
        );
        id
    }

    /// Bind one device per player slot: the first to the explorer, the second
    /// to the ghost. Extra devices are ignored.
    ///
    /// Rebinding drops every stream either entity was bound to or owned
    /// before, so each keeps exactly one home stream.
    pub fn bind_devices(
        &mut self,
        devices: &[DeviceId],
        explorer: Entity,
        ghost: Entity,
    ) -> Result<(StreamId, StreamId), RoutingError> {
        if devices.len() < PLAYER_SLOTS {
            return Err(RoutingError::NotEnoughDevices {
                found: devices.len(),
                required: PLAYER_SLOTS,
            });
        }
        self.forget_streams_of(explorer);
        self.forget_streams_of(ghost);
        let explorer_home = StreamOwner::Explorer(explorer);
        let ghost_home = StreamOwner::Ghost(ghost);
        let explorer_stream = self.register_stream(&devices[..1], explorer_home);
        let ghost_stream = self.register_stream(&devices[1..2], ghost_home);
        self.take_control(explorer_stream, explorer_home)?;
        self.assign_input(ghost_stream, ghost)?;
        info!(
            "Bound {:?} to explorer {:?} and {:?} to ghost {:?}",
            devices[0], explorer, devices[1], ghost
        );
        Ok((explorer_stream, ghost_stream))
    }

    /// Bind `stream` to `owner`, subscribe it and enable it.
    ///
    /// Any other stream the owner's entity held is released (disabled, left
    /// registered). Returns the owner that was displaced from `stream`, if
    /// any. An unknown stream aborts without touching any binding.
    pub fn take_control(
        &mut self,
        stream: StreamId,
        owner: StreamOwner,
    ) -> Result<Option<StreamOwner>, RoutingError> {
        if !self.streams.contains_key(&stream) {
            return Err(RoutingError::UnknownStream(stream));
        }
        if let Some(entity) = owner.entity() {
            for (id, other) in self.streams.iter_mut() {
                if *id != stream && other.owner.entity() == Some(entity) {
                    other.owner = StreamOwner::Unowned;
                    other.enabled = false;
                    debug!("Parked {:?} released by {:?}", id, entity);
                }
            }
        }
        let Some(target) = self.streams.get_mut(&stream) else {
            return Err(RoutingError::UnknownStream(stream));
        };
        let previous = std::mem::replace(&mut target.owner, owner);
        target.enabled = owner.is_owned();
        Ok(Some(previous).filter(|p| p.is_owned() && *p != owner))
    }

    /// Ghost flavour of [`take_control`](Self::take_control).
    pub fn assign_input(
        &mut self,
        stream: StreamId,
        ghost: Entity,
    ) -> Result<Option<StreamOwner>, RoutingError> {
        self.take_control(stream, StreamOwner::Ghost(ghost))
    }

    /// Unsubscribe `entity` from the stream it holds and disable that stream.
    pub fn release_control(&mut self, entity: Entity) -> Option<StreamId> {
        let id = self.stream_owned_by(entity)?;
        if let Some(stream) = self.streams.get_mut(&id) {
            stream.owner = StreamOwner::Unowned;
            stream.enabled = false;
        }
        Some(id)
    }

    pub fn stream(&self, id: StreamId) -> Option<&ActionStream> {
        self.streams.get(&id)
    }

    pub fn stream_for_device(&self, device: DeviceId) -> Option<StreamId> {
        self.by_device.get(&device).copied()
    }

    pub fn owner_of(&self, id: StreamId) -> StreamOwner {
        self.streams
            .get(&id)
            .map(|s| s.owner)
            .unwrap_or(StreamOwner::Unowned)
    }

    /// Stream currently owned by `entity`.
    pub fn stream_owned_by(&self, entity: Entity) -> Option<StreamId> {
        self.streams
            .iter()
            .filter(|(_, s)| s.owner.entity() == Some(entity))
            .map(|(id, _)| *id)
            .min()
    }

    /// Stream `entity` was bound to at startup.
    pub fn home_stream_of(&self, entity: Entity) -> Option<StreamId> {
        self.streams
            .iter()
            .filter(|(_, s)| s.home.entity() == Some(entity))
            .map(|(id, _)| *id)
            .min()
    }

    /// Remove every stream `entity` is home to or currently owns, together
    /// with its device bindings.
    fn forget_streams_of(&mut self, entity: Entity) {
        let stale: SmallVec<[StreamId; 2]> = self
            .streams
            .iter()
            .filter(|(_, s)| {
                s.home.entity() == Some(entity) || s.owner.entity() == Some(entity)
            })
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            self.streams.remove(&id);
            self.by_device.retain(|_, stream| *stream != id);
            debug!("Dropped stale {:?} of {:?}", id, entity);
        }
    }

    /// Number of streams currently owned by `entity`. Never more than one.
    pub fn streams_owned_by(&self, entity: Entity) -> usize {
        self.streams
            .values()
            .filter(|s| s.owner.entity() == Some(entity))
            .count()
    }

    pub fn is_bound(&self) -> bool {
        !self.streams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_entities() -> (World, Entity, Entity) {
        let mut world = World::new();
        let explorer = world.spawn_empty().id();
        let ghost = world.spawn_empty().id();
        (world, explorer, ghost)
    }

    #[test]
    fn bind_requires_two_devices() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let err = routing
            .bind_devices(&[DeviceId(0)], explorer, ghost)
            .unwrap_err();
        assert_eq!(
            err,
            RoutingError::NotEnoughDevices {
                found: 1,
                required: 2
            }
        );
        assert!(!routing.is_bound());
        assert!(routing.stream_for_device(DeviceId(0)).is_none());
    }

    #[test]
    fn bind_assigns_one_stream_per_player() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (es, gs) = routing
            .bind_devices(&[DeviceId(4), DeviceId(7), DeviceId(9)], explorer, ghost)
            .unwrap();

        assert_eq!(routing.stream_for_device(DeviceId(4)), Some(es));
        assert_eq!(routing.stream_for_device(DeviceId(7)), Some(gs));
        assert!(routing.stream_for_device(DeviceId(9)).is_none());
        assert_eq!(routing.owner_of(es), StreamOwner::Explorer(explorer));
        assert_eq!(routing.owner_of(gs), StreamOwner::Ghost(ghost));
        assert!(routing.stream(es).unwrap().enabled);
        assert!(routing.stream(gs).unwrap().enabled);
    }

    #[test]
    fn take_control_parks_the_previous_stream() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (es, gs) = routing
            .bind_devices(&[DeviceId(0), DeviceId(1)], explorer, ghost)
            .unwrap();

        let displaced = routing
            .take_control(gs, StreamOwner::Explorer(explorer))
            .unwrap();
        assert_eq!(displaced, Some(StreamOwner::Ghost(ghost)));

        let parked = routing.stream(es).unwrap();
        assert_eq!(parked.owner, StreamOwner::Unowned);
        assert!(!parked.enabled);
        assert_eq!(parked.home, StreamOwner::Explorer(explorer));

        assert_eq!(routing.owner_of(gs), StreamOwner::Explorer(explorer));
        assert_eq!(routing.streams_owned_by(explorer), 1);
        assert_eq!(routing.streams_owned_by(ghost), 0);
        assert_eq!(routing.home_stream_of(ghost), Some(gs));
    }

    #[test]
    fn take_control_of_unknown_stream_changes_nothing() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (es, _) = routing
            .bind_devices(&[DeviceId(0), DeviceId(1)], explorer, ghost)
            .unwrap();

        let err = routing
            .take_control(StreamId(99), StreamOwner::Explorer(explorer))
            .unwrap_err();
        assert_eq!(err, RoutingError::UnknownStream(StreamId(99)));
        assert_eq!(routing.owner_of(es), StreamOwner::Explorer(explorer));
        assert!(routing.stream(es).unwrap().enabled);
    }

    #[test]
    fn retaking_own_stream_reports_no_displacement() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (es, _) = routing
            .bind_devices(&[DeviceId(0), DeviceId(1)], explorer, ghost)
            .unwrap();
        let displaced = routing
            .take_control(es, StreamOwner::Explorer(explorer))
            .unwrap();
        assert!(displaced.is_none());
    }

    #[test]
    fn release_control_disables_the_stream() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (_, gs) = routing
            .bind_devices(&[DeviceId(0), DeviceId(1)], explorer, ghost)
            .unwrap();

        assert_eq!(routing.release_control(ghost), Some(gs));
        assert!(!routing.stream(gs).unwrap().enabled);
        assert_eq!(routing.owner_of(gs), StreamOwner::Unowned);
        assert_eq!(routing.release_control(ghost), None);
    }

    #[test]
    fn rebinding_replaces_the_previous_streams() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (old_es, old_gs) = routing
            .bind_devices(&[DeviceId(0), DeviceId(1)], explorer, ghost)
            .unwrap();
        // Leave the old ghost stream with the explorer, as during a possession.
        routing
            .take_control(old_gs, StreamOwner::Explorer(explorer))
            .unwrap();

        let (es, gs) = routing
            .bind_devices(&[DeviceId(2), DeviceId(3)], explorer, ghost)
            .unwrap();

        assert!(routing.stream(old_es).is_none());
        assert!(routing.stream(old_gs).is_none());
        assert!(routing.stream_for_device(DeviceId(0)).is_none());
        assert!(routing.stream_for_device(DeviceId(1)).is_none());
        assert_eq!(routing.home_stream_of(explorer), Some(es));
        assert_eq!(routing.home_stream_of(ghost), Some(gs));
        assert_eq!(routing.stream_owned_by(explorer), Some(es));
        assert_eq!(routing.stream_owned_by(ghost), Some(gs));
        assert_eq!(routing.streams_owned_by(explorer), 1);
    }

    #[test]
    fn failed_rebind_keeps_the_current_streams() {
        let (_world, explorer, ghost) = two_entities();
        let mut routing = InputRouting::new();
        let (es, gs) = routing
            .bind_devices(&[DeviceId(0), DeviceId(1)], explorer, ghost)
            .unwrap();
        assert!(routing.bind_devices(&[DeviceId(4)], explorer, ghost).is_err());
        assert_eq!(routing.home_stream_of(explorer), Some(es));
        assert_eq!(routing.home_stream_of(ghost), Some(gs));
    }

    #[test]
    fn register_stream_moves_devices() {
        let mut routing = InputRouting::new();
        let a = routing.register_stream(&[DeviceId(0), DeviceId(1)], StreamOwner::Unowned);
        let b = routing.register_stream(&[DeviceId(1)], StreamOwner::Unowned);
        assert_eq!(routing.stream_for_device(DeviceId(1)), Some(b));
        assert_eq!(routing.stream(a).unwrap().devices.as_slice(), &[DeviceId(0)]);
        assert!(!routing.stream(b).unwrap().enabled);
    }
}
