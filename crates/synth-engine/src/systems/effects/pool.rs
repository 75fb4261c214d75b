//! Fixed-capacity slot pool shared by every transient effect.

use crate::api::types::NodeId;
use crate::components::node::Node;
use crate::core::scene::Scene;

/// An effect drawn through one scene node per pool slot.
pub trait NodeBound {
    /// Copy the item's transform onto its node.
    fn write_node(&self, node: &mut Node);
}

/// Lifecycle state of one pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Dormant,
    Active,
}

/// A pooled item: `T::default()` is its parked (dormant) value.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub state: SlotState,
    pub item: T,
}

/// Pre-allocated pool. Never grows; spawning into a full pool is a no-op.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    active: usize,
}

impl<T: Default> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot { state: SlotState::Dormant, item: T::default() })
            .collect();
        Self { slots, active: 0 }
    }

    /// Activate the first dormant slot with `item`. Returns the slot index,
    /// or `None` (dropping the request) when the pool is saturated.
    pub fn spawn(&mut self, item: T) -> Option<usize> {
        if !self.can_spawn() {
            return None;
        }
        let index = self.slots.iter().position(|s| s.state == SlotState::Dormant)?;
        self.slots[index] = Slot { state: SlotState::Active, item };
        self.active += 1;
        Some(index)
    }

    /// Run `f` on every active item; items for which it returns `false`
    /// expire in the same pass.
    pub fn update(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        for slot in self.slots.iter_mut().filter(|s| s.state == SlotState::Active) {
            if !f(&mut slot.item) {
                slot.state = SlotState::Dormant;
                slot.item = T::default();
                self.active -= 1;
            }
        }
    }
}

impl<T> Pool<T> {
    pub fn can_spawn(&self) -> bool {
        self.active < self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter(|s| s.state == SlotState::Active)
            .map(|s| &s.item)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.state == SlotState::Active)
    }
}

impl<T: NodeBound> Pool<T> {
    /// Mirror every slot onto its node: active slots are shown at their
    /// current pose, dormant ones hidden at their parked pose.
    pub fn sync_nodes(&self, scene: &mut Scene, nodes: &[NodeId]) {
        for (slot, &id) in self.slots.iter().zip(nodes) {
            if let Some(node) = scene.get_mut(id) {
                slot.item.write_node(node);
                node.visible = slot.state == SlotState::Active;
            }
        }
    }
}
