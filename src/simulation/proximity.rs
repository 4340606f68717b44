//! Proximity pairs and the chain-to-chain distance computation
//!
//! A `ProximityPair` describes one near or overlapping feature between
//! two sphere-chain geometries: the signed surface distance, the two
//! surface points, and the sphere indices on both sides. Pairs against
//! other nuclei also carry the world index of the opposing agent so the
//! sliding force can look up its sphere velocity; the index is a plain
//! relation, valid only for the tick that produced it.

use crate::simulation::geometry::{unit_or_zero, NVec3, Spheres};

/// Classification token routing a neighbor to the right proximity list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Nucleus,
    ShapeHinter,
    Track,
}

/// One detected near/overlapping feature between two geometries
///
/// Sign convention: `distance > 0` means no contact, `distance <= 0`
/// means overlap with penetration depth `-distance`.
#[derive(Debug, Clone)]
pub struct ProximityPair {
    pub distance: f64,
    pub local_pos: NVec3,
    pub other_pos: NVec3,
    pub local_hint: usize,
    pub other_hint: usize,
    /// World index of the opposing nucleus, `None` for hinters and tracks.
    /// Never outlives the tick in which the pair was collected.
    pub other_agent: Option<usize>,
}

/// Per-agent proximity lists refreshed in every external-force phase
#[derive(Debug, Default)]
pub struct ProximityBatch {
    pub to_nuclei: Vec<ProximityPair>,
    pub to_hinters: Vec<ProximityPair>,
    pub to_tracks: Vec<ProximityPair>,
}

/// Append closest-feature pairs between `local` and `other` to `out`
///
/// For every local sphere the single nearest sphere of `other` is
/// reported: the signed gap `|c_o - c_l| - r_l - r_o` plus the two
/// surface points on the connecting line. Coincident centres degrade to
/// the centres themselves (zero direction), never to NaN.
pub fn get_distance(
    local: &Spheres,
    other: &Spheres,
    out: &mut Vec<ProximityPair>,
    other_agent: Option<usize>,
) {
    for i in 0..local.len() {
        let ci = local.centre(i);
        let ri = local.radius(i);

        // nearest sphere of the other chain
        let mut best: Option<(f64, usize)> = None;
        for j in 0..other.len() {
            let gap = (other.centre(j) - ci).norm() - ri - other.radius(j);
            if best.map_or(true, |(g, _)| gap < g) {
                best = Some((gap, j));
            }
        }
        let Some((gap, j)) = best else { continue };

        let dir = unit_or_zero(other.centre(j) - ci);
        out.push(ProximityPair {
            distance: gap,
            local_pos: ci + ri * dir,
            other_pos: other.centre(j) - other.radius(j) * dir,
            local_hint: i,
            other_hint: j,
            other_agent,
        });
    }
}

/// Read-only per-sphere velocities of every world agent, captured once
/// per tick between the intent-integration and external-force phases.
/// Static agents (hinters, tracks) contribute no entries and read as zero.
pub struct VelocitySnapshot {
    per_agent: Vec<Vec<NVec3>>,
}

impl VelocitySnapshot {
    pub fn new(per_agent: Vec<Vec<NVec3>>) -> Self {
        Self { per_agent }
    }

    /// Velocity of sphere `sphere` of world agent `agent`
    pub fn velocity_of_sphere(&self, agent: usize, sphere: usize) -> NVec3 {
        self.per_agent
            .get(agent)
            .and_then(|v| v.get(sphere))
            .copied()
            .unwrap_or_else(NVec3::zeros)
    }
}
