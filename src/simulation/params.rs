//! Numerical parameters and force-model tunables
//!
//! `Parameters` holds the runtime stepping settings (fixed step size and
//! end time). `ForceParams` gathers the scale constants of the contact
//! force model; each agent holds its own copy so scenarios can tune
//! populations independently.

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // total simulated time
    pub dt: f64,    // fixed step size, one tick per step
}

/// Scale constants of the nucleus force model
///
/// Defaults follow the TRAgen-derived contact model; units per field.
#[derive(Debug, Clone)]
pub struct ForceParams {
    pub body_scale: f64,    // [N/um]    recognized tunable, unused by the baseline law
    pub overlap_scale: f64, // [N/um]    linear growth past the calm zone
    pub overlap_level: f64, // [N]       base magnitude of body and repulsion forces
    pub overlap_depth: f64, // [um]      calm-zone penetration threshold
    pub rep_scale: f64,     // [1/um]    repulsion decay length
    pub slide_scale: f64,   // unitless  tangential damping strength
    pub hinter_scale: f64,  // [1/um^2]  hinter attraction growth
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            body_scale: 0.4,
            overlap_scale: 0.2,
            overlap_level: 0.1,
            overlap_depth: 0.5,
            rep_scale: 0.6,
            slide_scale: 1.0,
            hinter_scale: 0.25,
        }
    }
}
