//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! bundle: stepping parameters, force tunables, and a populated
//! `Scheduler` with all nuclei, shape hinters and guiding tracks at
//! t = 0. Configuration errors (empty chains, non-positive steps or
//! weights) are rejected here so the hot path never has to guard them.

use anyhow::{bail, Result};

use crate::configuration::config::{GeometryConfig, NucleusConfig, ScenarioConfig};
use crate::simulation::agent::{MotionIntent, NucleusAgent};
use crate::simulation::geometry::{NVec3, Spheres};
use crate::simulation::params::{ForceParams, Parameters};
use crate::simulation::scheduler::Scheduler;

/// A fully-initialized runtime scenario: parameters plus the world
pub struct Scenario {
    pub parameters: Parameters,
    pub scheduler: Scheduler,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        if cfg.parameters.dt <= 0.0 {
            bail!("step size dt must be positive, got {}", cfg.parameters.dt);
        }
        if cfg.parameters.t_end < 0.0 {
            bail!("t_end must be non-negative, got {}", cfg.parameters.t_end);
        }

        let parameters = Parameters {
            t_end: cfg.parameters.t_end,
            dt: cfg.parameters.dt,
        };

        // force tunables: defaults overlaid with whatever the YAML sets
        let defaults = ForceParams::default();
        let f_cfg = cfg.forces.unwrap_or_default();
        let force_params = ForceParams {
            body_scale: f_cfg.body_scale.unwrap_or(defaults.body_scale),
            overlap_scale: f_cfg.overlap_scale.unwrap_or(defaults.overlap_scale),
            overlap_level: f_cfg.overlap_level.unwrap_or(defaults.overlap_level),
            overlap_depth: f_cfg.overlap_depth.unwrap_or(defaults.overlap_depth),
            rep_scale: f_cfg.rep_scale.unwrap_or(defaults.rep_scale),
            slide_scale: f_cfg.slide_scale.unwrap_or(defaults.slide_scale),
            hinter_scale: f_cfg.hinter_scale.unwrap_or(defaults.hinter_scale),
        };

        let mut scheduler = Scheduler::new();

        for (i, nc) in cfg.nuclei.iter().enumerate() {
            let agent = build_nucleus(i, nc, force_params.clone())?;
            scheduler.add_nucleus(agent);
        }
        for gc in &cfg.hinters {
            scheduler.add_hinter(build_chain(gc)?);
        }
        for gc in &cfg.tracks {
            scheduler.add_track(build_chain(gc)?);
        }

        Ok(Self {
            parameters,
            scheduler,
        })
    }

    /// Advance the world to `t_end`, one fixed step per tick
    pub fn run(&mut self) {
        while self.scheduler.time() < self.parameters.t_end {
            self.scheduler.tick(self.parameters.dt);
        }
    }
}

fn build_chain(cfg: &GeometryConfig) -> Result<Spheres> {
    if cfg.spheres.is_empty() {
        bail!("sphere chain must contain at least one sphere");
    }
    let mut centres = Vec::with_capacity(cfg.spheres.len());
    let mut radii = Vec::with_capacity(cfg.spheres.len());
    for sc in &cfg.spheres {
        if sc.radius <= 0.0 {
            bail!("sphere radius must be positive, got {}", sc.radius);
        }
        centres.push(NVec3::new(sc.centre[0], sc.centre[1], sc.centre[2]));
        radii.push(sc.radius);
    }
    Ok(Spheres::new(centres, radii))
}

fn build_nucleus(id: usize, cfg: &NucleusConfig, params: ForceParams) -> Result<NucleusAgent> {
    let shape = build_chain(&GeometryConfig {
        spheres: cfg.spheres.clone(),
    })?;
    let sphere_count = shape.len();

    let intent = MotionIntent {
        desired_velocity: cfg
            .desired_velocity
            .map(|v| NVec3::new(v[0], v[1], v[2]))
            .unwrap_or_else(NVec3::zeros),
        persistence_time: cfg.persistence_time.unwrap_or(2.0),
    };
    if intent.persistence_time <= 0.0 {
        bail!(
            "persistence_time must be positive, got {}",
            intent.persistence_time
        );
    }

    let mut agent = NucleusAgent::new(id, shape, params).with_intent(intent);
    if let Some(width) = cfg.cytoplasm_width {
        if width < 0.0 {
            bail!("cytoplasm_width must be non-negative, got {width}");
        }
        agent = agent.with_cytoplasm_width(width);
    }
    if let Some(distance) = cfg.ignore_distance {
        agent = agent.with_ignore_distance(distance);
    }
    if let Some(weights) = &cfg.weights {
        if weights.len() != sphere_count {
            bail!(
                "nucleus {id}: {} weights given for {sphere_count} spheres",
                weights.len()
            );
        }
        if weights.iter().any(|w| *w <= 0.0) {
            bail!("nucleus {id}: weights must be positive");
        }
        agent.set_weights(weights.clone());
    }

    Ok(agent)
}
