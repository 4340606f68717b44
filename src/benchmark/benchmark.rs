use std::time::Instant;

use crate::simulation::agent::{MotionIntent, NucleusAgent};
use crate::simulation::forces::{build_nucleus_forces, Force};
use crate::simulation::geometry::{NVec3, Spheres};
use crate::simulation::params::ForceParams;
use crate::simulation::proximity::{ProximityPair, VelocitySnapshot};
use crate::simulation::scheduler::Scheduler;

/// Time the contact-force generator over growing pair counts
pub fn bench_contact_forces() {
    let ns = [1_000, 10_000, 100_000, 1_000_000];

    for n in ns {
        // one long chain, overlapping pair per sphere
        let centres: Vec<NVec3> = (0..n).map(|i| NVec3::new(i as f64 * 2.0, 0.0, 0.0)).collect();
        let radii = vec![1.5; n];
        let geometry = Spheres::new(centres, radii);
        let weights = vec![1.0; n];
        let velocities = vec![NVec3::new(0.1, 0.0, 0.0); n];

        let pairs: Vec<ProximityPair> = (0..n)
            .map(|i| {
                let c = geometry.centre(i);
                ProximityPair {
                    distance: -1.0,
                    local_pos: c + NVec3::new(1.5, 0.0, 0.0),
                    other_pos: c + NVec3::new(0.5, 0.0, 0.0),
                    local_hint: i,
                    other_hint: 0,
                    other_agent: Some(0),
                }
            })
            .collect();

        let snapshot = VelocitySnapshot::new(vec![vec![NVec3::new(0.0, 0.2, 0.0)]]);
        let params = ForceParams::default();
        let mut out: Vec<Force> = Vec::with_capacity(2 * n);

        // warm up
        build_nucleus_forces(&params, &geometry, &weights, &velocities, 2.0, &pairs, &snapshot, &mut out);
        out.clear();

        let t0 = Instant::now();
        build_nucleus_forces(&params, &geometry, &weights, &velocities, 2.0, &pairs, &snapshot, &mut out);
        let dt = t0.elapsed().as_secs_f64();

        println!("pairs = {n:8}, contact pass = {dt:8.6} s, forces emitted = {}", out.len());
    }
}

/// Time whole five-phase rounds over growing nucleus counts
pub fn bench_tick() {
    let ns = [50, 100, 200, 400, 800];

    for n in ns {
        let mut scheduler = Scheduler::new();

        for i in 0..n {
            let i_f = i as f64;
            // deterministic jittered grid, no rand needed
            let base = NVec3::new(
                (i % 20) as f64 * 7.0 + (i_f * 0.37).sin(),
                (i / 20) as f64 * 7.0 + (i_f * 0.13).cos(),
                (i_f * 0.07).sin() * 3.0,
            );
            let shape = Spheres::new(
                vec![base, base + NVec3::new(3.0, 0.0, 0.0)],
                vec![2.5, 2.5],
            );
            let agent = NucleusAgent::new(i, shape, ForceParams::default()).with_intent(
                MotionIntent {
                    desired_velocity: NVec3::new((i_f * 0.19).sin(), (i_f * 0.23).cos(), 0.0),
                    persistence_time: 2.0,
                },
            );
            scheduler.add_nucleus(agent);
        }

        // warm up
        scheduler.tick(0.1);

        let rounds = 10;
        let t0 = Instant::now();
        for _ in 0..rounds {
            scheduler.tick(0.1);
        }
        let dt = t0.elapsed().as_secs_f64() / rounds as f64;

        println!("nuclei = {n:4}, tick = {dt:8.6} s");
    }
}
