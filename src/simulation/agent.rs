//! The nucleus agent and its five-phase simulation round
//!
//! A `NucleusAgent` owns two sphere chains with identical sphere counts:
//! the internal geometry the forces act on, and the exposed geometry the
//! rest of the world reads (radii inflated by the cytoplasm width). One
//! tick runs five phases in fixed order, with the scheduler inserting a
//! barrier between phases across all agents:
//!
//! 1. `advance_and_build_int_forces` — behavior hook, driving forces, clock
//! 2. `adjust_geometry_by_int_forces` — integrate the intent motion
//! 3. `collect_ext_forces` — friction + proximity-derived forces
//! 4. `adjust_geometry_by_ext_forces` — integrate the contact response
//! 5. `publish_geometry` — project internal state into the exposed chain

use tracing::debug;

use crate::simulation::forces::{
    build_driving_forces, build_friction_forces, build_hinter_forces, build_nucleus_forces,
    Force,
};
use crate::simulation::geometry::{NVec3, Spheres};
use crate::simulation::integrator::adjust_geometry_by_forces;
use crate::simulation::params::ForceParams;
use crate::simulation::proximity::{ProximityBatch, ProximityPair, VelocitySnapshot};

/// Motion intent: where the agent wants to drift and how fast it adapts
#[derive(Debug, Clone)]
pub struct MotionIntent {
    /// desired current velocity [um/min]
    pub desired_velocity: NVec3,
    /// adaptation time toward the desired velocity; termed persistence
    /// time in the original literature [min]
    pub persistence_time: f64,
}

impl Default for MotionIntent {
    fn default() -> Self {
        Self {
            desired_velocity: NVec3::zeros(),
            persistence_time: 2.0,
        }
    }
}

/// Per-agent behavioral hook, run at the start of every round before the
/// driving forces are emitted; free to steer the motion intent.
pub trait Behavior: Send + Sync {
    fn advance(&mut self, time: f64, intent: &mut MotionIntent);
}

pub struct NucleusAgent {
    id: usize,

    /// geometry the outer world reads; radii carry the cytoplasm margin
    exposed: Spheres,
    /// geometry the forces move; same sphere count as `exposed`, always
    internal: Spheres,

    /// persists across ticks, one entry per sphere
    velocities: Vec<NVec3>,
    /// scratch buffer, recomputed by every integration pass
    accels: Vec<NVec3>,
    /// mass-like force-to-acceleration divisors, positive
    weights: Vec<f64>,

    intent: MotionIntent,
    behavior: Option<Box<dyn Behavior>>,

    /// retention zone around the nucleus simulating cytoplasm; exposed
    /// radii are inflated by this much [um]
    cytoplasm_width: f64,
    /// no interaction considered beyond this AABB distance [um]
    ignore_distance: f64,

    force_params: ForceParams,
    forces: Vec<Force>,

    // refreshed every external-force phase, dead after the tick
    pairs_to_nuclei: Vec<ProximityPair>,
    pairs_to_hinters: Vec<ProximityPair>,
    pairs_to_tracks: Vec<ProximityPair>,

    /// local clock, advanced by dt in phase 1
    time: f64,
}

impl NucleusAgent {
    pub fn new(id: usize, shape: Spheres, force_params: ForceParams) -> Self {
        let n = shape.len();
        let mut agent = Self {
            id,
            exposed: shape.clone(),
            internal: shape,
            velocities: vec![NVec3::zeros(); n],
            accels: vec![NVec3::zeros(); n],
            weights: vec![1.0; n],
            intent: MotionIntent::default(),
            behavior: None,
            cytoplasm_width: 2.0,
            ignore_distance: 10.0,
            force_params,
            // 10 neighbors * 4 spheres * 4 outer forces plus internals, up-rounded
            forces: Vec::with_capacity(200),
            pairs_to_nuclei: Vec::new(),
            pairs_to_hinters: Vec::new(),
            pairs_to_tracks: Vec::new(),
            time: 0.0,
        };
        agent.publish_geometry();
        agent
    }

    pub fn with_intent(mut self, intent: MotionIntent) -> Self {
        self.intent = intent;
        self
    }

    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_cytoplasm_width(mut self, width: f64) -> Self {
        self.cytoplasm_width = width;
        self.publish_geometry();
        self
    }

    pub fn with_ignore_distance(mut self, distance: f64) -> Self {
        self.ignore_distance = distance;
        self
    }

    /// Replace the per-sphere weights; length must match the sphere count
    /// and every entry must be positive (the hot path divides by them).
    pub fn set_weights(&mut self, weights: Vec<f64>) {
        debug_assert_eq!(weights.len(), self.internal.len(), "weight count mismatch");
        debug_assert!(weights.iter().all(|w| *w > 0.0), "non-positive weight");
        self.weights = weights;
    }

    // ------------- read-only accessors for the outer world -------------

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn exposed(&self) -> &Spheres {
        &self.exposed
    }

    pub fn internal(&self) -> &Spheres {
        &self.internal
    }

    pub fn velocity_of_sphere(&self, index: usize) -> NVec3 {
        debug_assert!(index < self.velocities.len(), "sphere index out of bounds");
        self.velocities[index]
    }

    pub fn velocities(&self) -> &[NVec3] {
        &self.velocities
    }

    pub fn ignore_distance(&self) -> f64 {
        self.ignore_distance
    }

    pub fn cytoplasm_width(&self) -> f64 {
        self.cytoplasm_width
    }

    pub fn intent(&self) -> &MotionIntent {
        &self.intent
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Pending ledger entries; non-empty only between a force-generation
    /// phase and the integration pass that consumes it
    pub fn force_ledger(&self) -> &[Force] {
        &self.forces
    }

    // ------------- one round of simulation -------------

    /// Phase 1: behavior hook, driving forces, advance the local clock
    pub fn advance_and_build_int_forces(&mut self, dt: f64) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.advance(self.time + dt, &mut self.intent);
        }

        // how and where the nucleus would like to move; acts rigidly on
        // the full chain
        build_driving_forces(
            &self.internal,
            &self.weights,
            self.intent.desired_velocity,
            self.intent.persistence_time,
            &mut self.forces,
        );

        self.time += dt;
    }

    /// Phase 2: integrate the intent motion
    pub fn adjust_geometry_by_int_forces(&mut self, dt: f64) {
        adjust_geometry_by_forces(
            &mut self.forces,
            &self.weights,
            &mut self.accels,
            &mut self.velocities,
            &mut self.internal,
            dt,
        );
    }

    /// Phase 3: friction plus everything derived from proximity data
    ///
    /// `pairs` holds the proximity lists the scheduler's distance
    /// collaborator built against this agent's exposed geometry;
    /// `neighbor_velocities` is the read-only cross-agent velocity view.
    pub fn collect_ext_forces(
        &mut self,
        pairs: ProximityBatch,
        neighbor_velocities: &VelocitySnapshot,
    ) {
        // friction is independent of other agents but belongs to the
        // external phase
        build_friction_forces(
            &self.internal,
            &self.weights,
            &self.velocities,
            self.intent.persistence_time,
            &mut self.forces,
        );

        self.pairs_to_nuclei = pairs.to_nuclei;
        self.pairs_to_hinters = pairs.to_hinters;
        self.pairs_to_tracks = pairs.to_tracks;

        debug!(
            id = self.id,
            to_nuclei = self.pairs_to_nuclei.len(),
            to_hinters = self.pairs_to_hinters.len(),
            to_tracks = self.pairs_to_tracks.len(),
            "proximity pairs collected"
        );

        build_nucleus_forces(
            &self.force_params,
            &self.internal,
            &self.weights,
            &self.velocities,
            self.intent.persistence_time,
            &self.pairs_to_nuclei,
            neighbor_velocities,
            &mut self.forces,
        );

        build_hinter_forces(
            &self.force_params,
            &self.internal,
            &self.pairs_to_hinters,
            &mut self.forces,
        );

        // guiding-track pairs are collected and routed but the baseline
        // force model converts none of them into forces (current behavior)
    }

    /// Phase 4: integrate the contact response
    pub fn adjust_geometry_by_ext_forces(&mut self, dt: f64) {
        adjust_geometry_by_forces(
            &mut self.forces,
            &self.weights,
            &mut self.accels,
            &mut self.velocities,
            &mut self.internal,
            dt,
        );
    }

    /// Phase 5: promote the internal geometry to the exposed one, radii
    /// inflated by the cytoplasm width
    pub fn publish_geometry(&mut self) {
        self.exposed.publish_from(&self.internal, self.cytoplasm_width);
    }
}
