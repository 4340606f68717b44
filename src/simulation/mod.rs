pub mod agent;
pub mod forces;
pub mod geometry;
pub mod integrator;
pub mod params;
pub mod proximity;
pub mod scenario;
pub mod scheduler;
