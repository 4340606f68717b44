//! Fixed-step integration of the force ledger
//!
//! Reduces the accumulated per-sphere forces into accelerations, advances
//! velocities and positions in-place with a first-order explicit step,
//! refreshes the geometry's bounding box and clears the ledger.
//!
//! The round driver invokes this twice per tick: once after the internal
//! (intent) forces, once after the external (contact) forces. Splitting
//! the two passes integrates contact response against the already-advanced
//! state, which is more stable than one combined pass at the old positions.

use crate::simulation::forces::Force;
use crate::simulation::geometry::{NVec3, Spheres};

/// Advance `geometry` by one pass over the ledger
///
/// - `accels` is a scratch buffer, zeroed here and overwritten
/// - `velocities` carries over between passes and between ticks
/// - `weights` must be positive; the caller guarantees this
///
/// The ledger is empty when this returns.
pub fn adjust_geometry_by_forces(
    forces: &mut Vec<Force>,
    weights: &[f64],
    accels: &mut [NVec3],
    velocities: &mut [NVec3],
    geometry: &mut Spheres,
    dt: f64,
) {
    let n = geometry.len();
    debug_assert_eq!(accels.len(), n, "acceleration buffer length mismatch");
    debug_assert_eq!(velocities.len(), n, "velocity buffer length mismatch");
    debug_assert_eq!(weights.len(), n, "weight buffer length mismatch");

    // reset the per-sphere net forces (which become accelerations below)
    for a in accels.iter_mut() {
        *a = NVec3::zeros();
    }

    // one overall force per sphere
    for f in forces.iter() {
        debug_assert!(f.sphere < n, "force hints at sphere index out of bounds");
        accels[f.sphere] += f.f;
    }

    let centres = geometry.centres_mut();
    for i in 0..n {
        // F = m a  ->  a = F / m
        accels[i] /= weights[i];

        // v += a dt
        velocities[i] += dt * accels[i];

        // x += v dt
        centres[i] += dt * velocities[i];
    }

    geometry.update_aabb();

    // all forces processed
    forces.clear();
}
