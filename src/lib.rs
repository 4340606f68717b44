pub mod benchmark;
pub mod configuration;
pub mod simulation;

pub use simulation::agent::{Behavior, MotionIntent, NucleusAgent};
pub use simulation::forces::{Force, ForceKind, REPULSION_CUTOFF};
pub use simulation::geometry::{unit_or_zero, Aabb, NVec3, Spheres};
pub use simulation::params::{ForceParams, Parameters};
pub use simulation::proximity::{
    get_distance, AgentKind, ProximityBatch, ProximityPair, VelocitySnapshot,
};
pub use simulation::scenario::Scenario;
pub use simulation::scheduler::{Scheduler, WorldAgent};

pub use configuration::config::{
    ForcesConfig, GeometryConfig, NucleusConfig, ParametersConfig, ScenarioConfig, SphereConfig,
};

pub use benchmark::benchmark::{bench_contact_forces, bench_tick};
