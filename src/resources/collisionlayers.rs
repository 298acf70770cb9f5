//! Named collision layers and the layer-pair collision matrix.
//!
//! Every collidable entity sits on exactly one [`Layer`]. Whether two layers
//! interact is decided by a symmetric ignore matrix, so a query issued on
//! behalf of an entity only considers the layers returned by
//! [`CollisionLayers::collision_mask`] for that entity's layer.
//!
//! Phasing uses this directly: the ghost's layer is switched to one that
//! ignores the phaseable-wall layer while still colliding with the default
//! layer.

use bevy_ecs::prelude::Resource;
use log::debug;

/// Maximum number of distinct layers (one bit each in a [`LayerMask`]).
pub const MAX_LAYERS: usize = 32;

/// Index of a named collision layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(u8);

impl Layer {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn bit(self) -> u32 {
        1u32 << self.0
    }
}

/// Set of layers, one bit per layer index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    pub fn with(self, layer: Layer) -> Self {
        LayerMask(self.0 | layer.bit())
    }

    pub fn without(self, layer: Layer) -> Self {
        LayerMask(self.0 & !layer.bit())
    }
}

impl FromIterator<Layer> for LayerMask {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        iter.into_iter().fold(LayerMask::NONE, LayerMask::with)
    }
}

/// Layer registry plus the symmetric ignore matrix.
#[derive(Resource, Debug, Clone)]
pub struct CollisionLayers {
    names: Vec<String>,
    /// `ignore[a]` has bit `b` set when layers `a` and `b` do not collide.
    ignore: [u32; MAX_LAYERS],
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionLayers {
    /// Registry with a single `"Default"` layer at index 0.
    pub fn new() -> Self {
        Self {
            names: vec!["Default".to_string()],
            ignore: [0; MAX_LAYERS],
        }
    }

    /// Look up a layer by name.
    pub fn name_to_layer(&self, name: &str) -> Option<Layer> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| Layer(i as u8))
    }

    pub fn layer_name(&self, layer: Layer) -> Option<&str> {
        self.names.get(layer.index()).map(String::as_str)
    }

    /// Return the layer with this name, registering it if needed.
    ///
    /// Returns `None` once all [`MAX_LAYERS`] slots are taken.
    pub fn ensure_layer(&mut self, name: &str) -> Option<Layer> {
        if let Some(layer) = self.name_to_layer(name) {
            return Some(layer);
        }
        if self.names.len() >= MAX_LAYERS {
            return None;
        }
        self.names.push(name.to_string());
        let layer = Layer((self.names.len() - 1) as u8);
        debug!("Registered collision layer {:?} as {}", name, layer.index());
        Some(layer)
    }

    /// Enable or disable collision between two layers (symmetric).
    pub fn set_ignore(&mut self, a: Layer, b: Layer, ignore: bool) {
        if ignore {
            self.ignore[a.index()] |= b.bit();
            self.ignore[b.index()] |= a.bit();
        } else {
            self.ignore[a.index()] &= !b.bit();
            self.ignore[b.index()] &= !a.bit();
        }
    }

    pub fn collides(&self, a: Layer, b: Layer) -> bool {
        self.ignore[a.index()] & b.bit() == 0
    }

    /// Every registered layer that collides with `layer`.
    pub fn collision_mask(&self, layer: Layer) -> LayerMask {
        (0..self.names.len())
            .map(|i| Layer(i as u8))
            .filter(|other| self.collides(layer, *other))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
