//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – stepping settings (step size, end time)
//! - [`ForcesConfig`]     – optional force-model tunables (defaults apply)
//! - [`NucleusConfig`]    – initial state for each nucleus
//! - [`GeometryConfig`]   – static sphere chains (shape hinters, tracks)
//! - [`ScenarioConfig`]   – top-level wrapper used to load from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   t_end: 30.0            # total simulated time [min]
//!   dt: 0.1                # fixed step size [min]
//!
//! forces:                  # optional; omitted fields keep their defaults
//!   overlap_level: 0.1
//!   overlap_scale: 0.2
//!   overlap_depth: 0.5
//!   rep_scale: 0.6
//!   slide_scale: 1.0
//!   hinter_scale: 0.25
//!
//! nuclei:
//!   - spheres:
//!       - { centre: [0.0, 0.0, 0.0], radius: 3.0 }
//!       - { centre: [4.0, 0.0, 0.0], radius: 3.0 }
//!     desired_velocity: [0.5, 0.0, 0.0]
//!     persistence_time: 2.0
//!     cytoplasm_width: 2.0
//!     ignore_distance: 10.0
//!     weights: [1.0, 1.0]  # optional, defaults to 1.0 per sphere
//!
//! hinters:
//!   - spheres:
//!       - { centre: [0.0, -20.0, 0.0], radius: 15.0 }
//!
//! tracks: []
//! ```
//!
//! The scenario builder maps this configuration into the runtime agent
//! and scheduler structs.

use serde::Deserialize;

/// Stepping settings for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // total simulated time
    pub dt: f64,    // fixed step size
}

/// Force-model tunables; any omitted field keeps the built-in default
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ForcesConfig {
    pub body_scale: Option<f64>,
    pub overlap_scale: Option<f64>,
    pub overlap_level: Option<f64>,
    pub overlap_depth: Option<f64>,
    pub rep_scale: Option<f64>,
    pub slide_scale: Option<f64>,
    pub hinter_scale: Option<f64>,
}

/// One sphere of a chain
#[derive(Deserialize, Debug, Clone)]
pub struct SphereConfig {
    pub centre: [f64; 3],
    pub radius: f64,
}

/// A static sphere-chain geometry (shape hinter or guiding track)
#[derive(Deserialize, Debug, Clone)]
pub struct GeometryConfig {
    pub spheres: Vec<SphereConfig>,
}

/// Initial state of a single nucleus
#[derive(Deserialize, Debug, Clone)]
pub struct NucleusConfig {
    pub spheres: Vec<SphereConfig>,        // the chain, in order
    pub desired_velocity: Option<[f64; 3]>, // default: no own movement
    pub persistence_time: Option<f64>,      // default 2.0
    pub cytoplasm_width: Option<f64>,       // default 2.0
    pub ignore_distance: Option<f64>,       // default 10.0
    pub weights: Option<Vec<f64>>,          // default 1.0 per sphere
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub forces: Option<ForcesConfig>,
    pub nuclei: Vec<NucleusConfig>,
    #[serde(default)]
    pub hinters: Vec<GeometryConfig>,
    #[serde(default)]
    pub tracks: Vec<GeometryConfig>,
}
