//! Transient effects: background streaks, the comet, meteors and their
//! impact bursts.
//!
//! This module provides the `EffectsState` facade that owns every pool and
//! advances them in a fixed order, plus the individual effect types.

mod comet;
mod impact;
mod meteor;
mod pool;
mod streak;

pub use comet::{Comet, CometSlot, COMET_PARK};
pub use impact::{BurstKind, ImpactField, ImpactParticle, BURST_SIZE, PARKED_POINT};
pub use meteor::{Meteor, MeteorShower, IMPACT_HEIGHT, METEOR_PARK_Y};
pub use pool::{NodeBound, Pool, Slot, SlotState};
pub use streak::{Streak, StreakField, STREAK_PARK_Y};

use glam::Vec3;

use crate::api::config::PoolConfig;
use crate::api::types::{NodeId, SceneEvent};
use crate::core::rng::RandomSource;
use crate::core::scene::Scene;

/// Scene nodes that display the pooled effects, one per slot.
#[derive(Debug, Clone, Default)]
pub struct EffectNodes {
    pub streaks: Vec<NodeId>,
    /// Comet group (oriented along its velocity).
    pub comet: Option<NodeId>,
    /// Comet head glow (rolled once per pass).
    pub comet_head: Option<NodeId>,
    pub meteors: Vec<NodeId>,
}

/// Container for all transient effects.
pub struct EffectsState {
    pub streaks: StreakField,
    pub comet: CometSlot,
    pub meteors: MeteorShower,
    pub impacts: ImpactField,
    /// Events raised during the current frame.
    events: Vec<SceneEvent>,
    /// Scratch list of this frame's meteor strikes.
    strikes: Vec<Vec3>,
}

impl EffectsState {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            streaks: StreakField::new(config),
            comet: CometSlot::new(config),
            meteors: MeteorShower::new(config),
            impacts: ImpactField::new(config.impact_capacity),
            events: Vec::with_capacity(4),
            strikes: Vec::with_capacity(config.meteor_capacity),
        }
    }

    /// Advance every pool one frame: streaks, comet, meteors (which may
    /// allocate impact bursts), then impact particles.
    pub fn update(&mut self, rng: &mut dyn RandomSource) {
        self.events.clear();

        self.streaks.update(rng);

        if let Some(start) = self.comet.update(rng) {
            self.events.push(SceneEvent::comet(start.x, start.y, start.z));
        }

        self.strikes.clear();
        self.meteors.update(rng, &mut self.strikes);
        for &site in &self.strikes {
            let allocated = self.impacts.burst(site, rng);
            log::debug!("meteor impact at {site}: {allocated} particles");
            self.events.push(SceneEvent::impact(site.x, site.y, site.z));
        }

        self.impacts.update();
    }

    /// Copy every pooled transform onto its scene node.
    pub fn sync_nodes(&self, scene: &mut Scene, nodes: &EffectNodes) {
        self.streaks.pool.sync_nodes(scene, &nodes.streaks);
        self.meteors.pool.sync_nodes(scene, &nodes.meteors);
        if let Some(id) = nodes.comet {
            self.comet.pool.sync_nodes(scene, std::slice::from_ref(&id));
        }
        if let Some(head) = nodes.comet_head.and_then(|id| scene.get_mut(id)) {
            head.rotation.z = self.comet.head_roll();
        }
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Total live effect instances across all pools.
    pub fn active_count(&self) -> usize {
        self.streaks.pool.active_count()
            + self.comet.pool.active_count()
            + self.meteors.pool.active_count()
            + self.impacts.active_count()
    }
}
