//! Force contributors for the nucleus mechanics engine
//!
//! Defines the transient force ledger (`Force`, `ForceKind`) and the two
//! generators that fill it each round:
//! - internal forces: driving toward the desired velocity, linear friction
//! - proximity forces: repulsion, contact/body, sliding damping against
//!   neighboring nuclei, and the rigid attraction toward a shape hinter
//!
//! Every generator appends entries to the caller's ledger; the ledger is
//! consumed (and cleared) by the integrator.

use tracing::trace;

use crate::simulation::geometry::{unit_or_zero, NVec3, Spheres};
use crate::simulation::params::ForceParams;
use crate::simulation::proximity::{ProximityPair, VelocitySnapshot};

/// Repulsion acts only below this surface distance [um]
// TODO: derive the cutoff from rep_scale instead of fixing it
pub const REPULSION_CUTOFF: f64 = 3.0;

/// What produced a ledger entry; kept for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceKind {
    Drive,
    Friction,
    Repulsive,
    Body,
    Slide,
    Hinter,
}

/// One force contribution: vector `f` acting at `base` on sphere `sphere`
#[derive(Debug, Clone)]
pub struct Force {
    pub f: NVec3,
    pub base: NVec3,
    pub sphere: usize,
    pub kind: ForceKind,
}

// =========================================================================================
// Internal forces (agent-local, no external data)
// =========================================================================================

/// Driving force on every sphere: `(w_i / tau) * v_desired`
///
/// Absent any resistance this makes the velocity approach `v_desired`
/// exponentially with time constant `persistence_time`. Acts rigidly on
/// the full chain.
pub fn build_driving_forces(
    geometry: &Spheres,
    weights: &[f64],
    desired_velocity: NVec3,
    persistence_time: f64,
    out: &mut Vec<Force>,
) {
    for i in 0..geometry.len() {
        out.push(Force {
            f: (weights[i] / persistence_time) * desired_velocity,
            base: geometry.centre(i),
            sphere: i,
            kind: ForceKind::Drive,
        });
    }
}

/// Friction force on every sphere: `-(w_i / tau) * v_i`
///
/// Linear drag with the same time constant as the drive; emitted in the
/// external-force phase.
pub fn build_friction_forces(
    geometry: &Spheres,
    weights: &[f64],
    velocities: &[NVec3],
    persistence_time: f64,
    out: &mut Vec<Force>,
) {
    for i in 0..geometry.len() {
        out.push(Force {
            f: (-weights[i] / persistence_time) * velocities[i],
            base: geometry.centre(i),
            sphere: i,
            kind: ForceKind::Friction,
        });
    }
}

// =========================================================================================
// Proximity forces against other nuclei
// =========================================================================================

/// Convert proximity pairs against other nuclei into repulsion, body and
/// sliding forces
///
/// - `pp.distance > 0`: repulsion of magnitude
///   `overlap_level * exp(-d / rep_scale)` away from the neighbor,
///   only below [`REPULSION_CUTOFF`]
/// - `pp.distance <= 0`: body force of magnitude `overlap_level`, plus
///   `overlap_scale * (depth - overlap_depth)` once the penetration
///   leaves the calm zone (exactly zero at the boundary), plus a sliding
///   force damping the tangential relative velocity
///
/// Forces act at the internal geometry's centres; surface points and
/// distances come from the exposed geometries the pairs were built on.
pub fn build_nucleus_forces(
    params: &ForceParams,
    geometry: &Spheres,
    weights: &[f64],
    velocities: &[NVec3],
    persistence_time: f64,
    pairs: &[ProximityPair],
    neighbor_velocities: &VelocitySnapshot,
    out: &mut Vec<Force>,
) {
    for pp in pairs {
        if pp.distance > 0.0 {
            // no collision; repulsion only makes sense at short range
            if pp.distance < REPULSION_CUTOFF {
                // unit vector away from the other buddy
                let f = unit_or_zero(pp.local_pos - pp.other_pos);
                out.push(Force {
                    f: (params.overlap_level * (-pp.distance / params.rep_scale).exp()) * f,
                    base: geometry.centre(pp.local_hint),
                    sphere: pp.local_hint,
                    kind: ForceKind::Repulsive,
                });
            }
        } else {
            // collision, pp.distance <= 0
            // NB: under contact the other surface sits inside the local
            //     volume, so local->other already points away from the
            //     neighbor
            let f = unit_or_zero(pp.other_pos - pp.local_pos);

            let mut f_scale = params.overlap_level;
            if -pp.distance > params.overlap_depth {
                // outside the calm zone the force grows with penetration depth
                f_scale += params.overlap_scale * (-pp.distance - params.overlap_depth);
            }
            trace!(
                distance = pp.distance,
                magnitude = f_scale,
                "body force"
            );
            out.push(Force {
                f: f_scale * f,
                base: geometry.centre(pp.local_hint),
                sphere: pp.local_hint,
                kind: ForceKind::Body,
            });

            // sliding: damp the relative velocity along the contact surface
            // without resisting approach/separation along the normal
            let Some(other) = pp.other_agent else { continue };
            let mut g = neighbor_velocities.velocity_of_sphere(other, pp.other_hint)
                - velocities[pp.local_hint];
            // remove the component parallel to the contact normal
            g -= f.dot(&g) * f;
            // same velocity-to-force conversion as the drive
            g *= params.slide_scale * weights[pp.local_hint] / persistence_time;
            out.push(Force {
                f: g,
                base: geometry.centre(pp.local_hint),
                sphere: pp.local_hint,
                kind: ForceKind::Slide,
            });
        }
    }
}

// =========================================================================================
// Attraction toward the static shape hinter
// =========================================================================================

/// Convert shape-hinter proximity pairs into a rigid correction force
///
/// Only pairs tied to the chain's first sphere are consulted. The force
/// magnitude `2 * overlap_level * min(d^2 * hinter_scale, 1)` points
/// toward the hinter surface and the identical vector is applied to
/// every sphere of the chain.
pub fn build_hinter_forces(
    params: &ForceParams,
    geometry: &Spheres,
    pairs: &[ProximityPair],
    out: &mut Vec<Force>,
) {
    for pp in pairs {
        if pp.local_hint != 0 {
            continue;
        }
        // unit vector toward the shape hinter
        let mut f = unit_or_zero(pp.other_pos - pp.local_pos);
        f *= 2.0
            * params.overlap_level
            * (pp.distance * pp.distance * params.hinter_scale).min(1.0);

        for i in 0..geometry.len() {
            out.push(Force {
                f,
                base: geometry.centre(i),
                sphere: i,
                kind: ForceKind::Hinter,
            });
        }
    }
}
