//! The world scheduler: agent ownership and barrier-ordered rounds
//!
//! Owns every agent in the world (nuclei plus the static shape hinters
//! and guiding tracks) and advances them tick by tick. The hard ordering
//! contract: every agent completes phase N before any agent begins phase
//! N+1, so the external-force phase always observes a consistent snapshot
//! of all agents. Within one phase agents only write their own buffers
//! and read others through read-only accessors, so each phase runs agents
//! in parallel.

use rayon::prelude::*;
use tracing::debug;

use crate::simulation::agent::NucleusAgent;
use crate::simulation::geometry::Spheres;
use crate::simulation::proximity::{
    get_distance, AgentKind, ProximityBatch, VelocitySnapshot,
};

/// One inhabitant of the world: a simulated nucleus, or a static
/// geometry (shape hinter or guiding track) that never moves
pub enum WorldAgent {
    Nucleus(NucleusAgent),
    Static { kind: AgentKind, geometry: Spheres },
}

impl WorldAgent {
    pub fn kind(&self) -> AgentKind {
        match self {
            WorldAgent::Nucleus(_) => AgentKind::Nucleus,
            WorldAgent::Static { kind, .. } => *kind,
        }
    }

    /// The geometry the rest of the world is allowed to see
    pub fn exposed_geometry(&self) -> &Spheres {
        match self {
            WorldAgent::Nucleus(agent) => agent.exposed(),
            WorldAgent::Static { geometry, .. } => geometry,
        }
    }
}

/// Advances all agents through the five phases of each round
pub struct Scheduler {
    agents: Vec<WorldAgent>,
    t: f64,
    tick_count: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            t: 0.0,
            tick_count: 0,
        }
    }

    /// Add a nucleus; returns its world index
    pub fn add_nucleus(&mut self, agent: NucleusAgent) -> usize {
        self.agents.push(WorldAgent::Nucleus(agent));
        self.agents.len() - 1
    }

    /// Add a static shape hinter; returns its world index
    pub fn add_hinter(&mut self, geometry: Spheres) -> usize {
        self.agents.push(WorldAgent::Static {
            kind: AgentKind::ShapeHinter,
            geometry,
        });
        self.agents.len() - 1
    }

    /// Add a static guiding track; returns its world index
    pub fn add_track(&mut self, geometry: Spheres) -> usize {
        self.agents.push(WorldAgent::Static {
            kind: AgentKind::Track,
            geometry,
        });
        self.agents.len() - 1
    }

    pub fn agents(&self) -> &[WorldAgent] {
        &self.agents
    }

    pub fn nucleus(&self, index: usize) -> Option<&NucleusAgent> {
        match self.agents.get(index) {
            Some(WorldAgent::Nucleus(agent)) => Some(agent),
            _ => None,
        }
    }

    pub fn nuclei(&self) -> impl Iterator<Item = &NucleusAgent> {
        self.agents.iter().filter_map(|a| match a {
            WorldAgent::Nucleus(agent) => Some(agent),
            _ => None,
        })
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// World indices of agents whose exposed bounding volume lies within
    /// `max_distance` of agent `index`'s, excluding `index` itself
    pub fn nearby_agents(&self, index: usize, max_distance: f64) -> Vec<usize> {
        let own = self.agents[index].exposed_geometry().aabb;
        self.agents
            .iter()
            .enumerate()
            .filter(|(j, other)| {
                *j != index && own.min_distance(&other.exposed_geometry().aabb) <= max_distance
            })
            .map(|(j, _)| j)
            .collect()
    }

    /// Run one full round: five phases over all agents, a barrier between
    /// phases, parallel across agents within each phase
    pub fn tick(&mut self, dt: f64) {
        // phase 1: behavior hooks + driving forces
        self.agents.par_iter_mut().for_each(|a| {
            if let WorldAgent::Nucleus(agent) = a {
                agent.advance_and_build_int_forces(dt);
            }
        });

        // phase 2: integrate the intent motion
        self.agents.par_iter_mut().for_each(|a| {
            if let WorldAgent::Nucleus(agent) = a {
                agent.adjust_geometry_by_int_forces(dt);
            }
        });

        // phase 3: proximity collection against the consistent
        // post-phase-2 state, then force emission
        //
        // First pass is read-only: neighbor query by AABB distance,
        // routing by agent kind, distance computation into per-agent
        // batches. Second pass hands each nucleus its batch together
        // with the cross-agent velocity snapshot.
        let agents = &self.agents;
        let batches: Vec<Option<ProximityBatch>> = (0..agents.len())
            .into_par_iter()
            .map(|i| {
                let WorldAgent::Nucleus(agent) = &agents[i] else {
                    return None;
                };
                let mut batch = ProximityBatch::default();
                for j in self.nearby_agents(i, agent.ignore_distance()) {
                    let other = &agents[j];
                    let geometry = other.exposed_geometry();
                    match other.kind() {
                        AgentKind::Nucleus => {
                            get_distance(agent.exposed(), geometry, &mut batch.to_nuclei, Some(j))
                        }
                        AgentKind::ShapeHinter => {
                            get_distance(agent.exposed(), geometry, &mut batch.to_hinters, None)
                        }
                        AgentKind::Track => {
                            get_distance(agent.exposed(), geometry, &mut batch.to_tracks, None)
                        }
                    }
                }
                Some(batch)
            })
            .collect();

        let snapshot = VelocitySnapshot::new(
            self.agents
                .iter()
                .map(|a| match a {
                    WorldAgent::Nucleus(agent) => agent.velocities().to_vec(),
                    WorldAgent::Static { .. } => Vec::new(),
                })
                .collect(),
        );

        self.agents
            .par_iter_mut()
            .zip(batches.into_par_iter())
            .for_each(|(a, batch)| {
                if let (WorldAgent::Nucleus(agent), Some(batch)) = (a, batch) {
                    agent.collect_ext_forces(batch, &snapshot);
                }
            });

        // phase 4: integrate the contact response
        self.agents.par_iter_mut().for_each(|a| {
            if let WorldAgent::Nucleus(agent) = a {
                agent.adjust_geometry_by_ext_forces(dt);
            }
        });

        // phase 5: publish
        self.agents.par_iter_mut().for_each(|a| {
            if let WorldAgent::Nucleus(agent) = a {
                agent.publish_geometry();
            }
        });

        self.t += dt;
        self.tick_count += 1;
        debug!(tick = self.tick_count, t = self.t, "round complete");
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
