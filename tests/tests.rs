use nucsim::simulation::agent::{MotionIntent, NucleusAgent};
use nucsim::simulation::forces::{
    build_hinter_forces, build_nucleus_forces, Force, ForceKind, REPULSION_CUTOFF,
};
use nucsim::simulation::geometry::{unit_or_zero, NVec3, Spheres};
use nucsim::simulation::integrator::adjust_geometry_by_forces;
use nucsim::simulation::params::ForceParams;
use nucsim::simulation::proximity::{get_distance, ProximityBatch, ProximityPair, VelocitySnapshot};
use nucsim::simulation::scheduler::Scheduler;

/// Build a single-sphere chain at `centre` with the given radius
pub fn single_sphere(centre: [f64; 3], radius: f64) -> Spheres {
    Spheres::new(vec![NVec3::new(centre[0], centre[1], centre[2])], vec![radius])
}

/// Build an n-sphere chain along the x-axis, radius 1, centres 1.5 apart
pub fn chain(n: usize) -> Spheres {
    let centres = (0..n).map(|i| NVec3::new(i as f64 * 1.5, 0.0, 0.0)).collect();
    Spheres::new(centres, vec![1.0; n])
}

/// A proximity pair against a neighbor along +x of a unit sphere at the
/// origin; `distance` follows the usual sign convention
pub fn pair_along_x(distance: f64) -> ProximityPair {
    ProximityPair {
        distance,
        local_pos: NVec3::new(1.0, 0.0, 0.0),
        other_pos: NVec3::new(1.0 + distance, 0.0, 0.0),
        local_hint: 0,
        other_hint: 0,
        other_agent: None,
    }
}

/// Run the nucleus-contact generator over one pair and return the ledger
pub fn contact_forces(pair: ProximityPair) -> Vec<Force> {
    let geometry = single_sphere([0.0, 0.0, 0.0], 1.0);
    let mut out = Vec::new();
    build_nucleus_forces(
        &ForceParams::default(),
        &geometry,
        &[1.0],
        &[NVec3::zeros()],
        2.0,
        &[pair],
        &VelocitySnapshot::new(Vec::new()),
        &mut out,
    );
    out
}

// ==================================================================================
// Geometry tests
// ==================================================================================

#[test]
fn zero_vector_normalizes_to_zero() {
    let v = unit_or_zero(NVec3::zeros());
    assert_eq!(v, NVec3::zeros());
    assert!(!v.x.is_nan() && !v.y.is_nan() && !v.z.is_nan(), "NaN leaked");
}

#[test]
fn aabb_distance_zero_when_overlapping() {
    let a = single_sphere([0.0, 0.0, 0.0], 2.0);
    let b = single_sphere([1.0, 0.0, 0.0], 2.0);
    assert_eq!(a.aabb.min_distance(&b.aabb), 0.0);

    let c = single_sphere([10.0, 0.0, 0.0], 2.0);
    // boxes [-2,2] and [8,12] on x: gap of 6
    assert!((a.aabb.min_distance(&c.aabb) - 6.0).abs() < 1e-12);
}

#[test]
fn proximity_sign_convention() {
    let local = single_sphere([0.0, 0.0, 0.0], 1.0);
    let other = single_sphere([3.0, 0.0, 0.0], 1.0);
    let mut out = Vec::new();
    get_distance(&local, &other, &mut out, Some(7));

    assert_eq!(out.len(), 1);
    let pp = &out[0];
    assert!((pp.distance - 1.0).abs() < 1e-12, "gap should be +1");
    assert!((pp.local_pos - NVec3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    assert!((pp.other_pos - NVec3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    assert_eq!(pp.other_agent, Some(7));

    // overlapping chains report negative distance = -penetration
    let near = single_sphere([1.5, 0.0, 0.0], 1.0);
    let mut out = Vec::new();
    get_distance(&local, &near, &mut out, None);
    assert!((out[0].distance + 0.5).abs() < 1e-12, "penetration 0.5 expected");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn zero_net_force_leaves_state_unchanged() {
    let mut geometry = single_sphere([1.0, 2.0, 3.0], 1.0);
    let mut forces: Vec<Force> = Vec::new();
    let mut accels = vec![NVec3::zeros()];
    let mut velocities = vec![NVec3::zeros()];

    adjust_geometry_by_forces(&mut forces, &[1.0], &mut accels, &mut velocities, &mut geometry, 0.1);

    assert_eq!(velocities[0], NVec3::zeros(), "velocity changed without force");
    assert_eq!(geometry.centre(0), NVec3::new(1.0, 2.0, 3.0), "position changed without force");
}

#[test]
fn ledger_is_empty_after_each_integration_pass() {
    let shape = chain(2);
    let mut agent = NucleusAgent::new(0, shape, ForceParams::default()).with_intent(MotionIntent {
        desired_velocity: NVec3::new(1.0, 0.0, 0.0),
        persistence_time: 2.0,
    });

    agent.advance_and_build_int_forces(0.1);
    assert!(!agent.force_ledger().is_empty(), "drive phase emitted nothing");
    agent.adjust_geometry_by_int_forces(0.1);
    assert!(agent.force_ledger().is_empty(), "ledger not cleared after int pass");

    agent.collect_ext_forces(ProximityBatch::default(), &VelocitySnapshot::new(Vec::new()));
    assert!(!agent.force_ledger().is_empty(), "friction phase emitted nothing");
    agent.adjust_geometry_by_ext_forces(0.1);
    assert!(agent.force_ledger().is_empty(), "ledger not cleared after ext pass");
}

// ==================================================================================
// Repulsion tests
// ==================================================================================

#[test]
fn repulsion_decreases_with_distance_and_cuts_off() {
    let mut last = f64::INFINITY;
    for d in [0.5, 1.0, 1.5, 2.0, 2.5, 2.9] {
        let out = contact_forces(pair_along_x(d));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ForceKind::Repulsive);
        let mag = out[0].f.norm();
        assert!(mag < last, "repulsion not strictly decreasing at d={d}");
        last = mag;
    }

    // at and beyond the cutoff there is no force at all
    for d in [REPULSION_CUTOFF, REPULSION_CUTOFF + 0.5] {
        assert!(contact_forces(pair_along_x(d)).is_empty(), "force beyond cutoff at d={d}");
    }
}

#[test]
fn repulsion_magnitude_scenario() {
    // d = +1.0, rep_scale = 0.6, overlap_level = 0.1
    let out = contact_forces(pair_along_x(1.0));
    let mag = out[0].f.norm();
    let expected = 0.1 * (-1.0f64 / 0.6).exp();
    assert!((mag - expected).abs() < 1e-12, "got {mag}, expected {expected}");
    assert!((mag - 0.0189).abs() < 1e-4);

    // directed away from the neighbor (neighbor sits at +x)
    assert!(out[0].f.x < 0.0, "repulsion should point away from the neighbor");
}

// ==================================================================================
// Body-force tests
// ==================================================================================

#[test]
fn body_force_grows_past_calm_zone() {
    // penetration 1.0, overlap_depth 0.5, overlap_scale 0.2, overlap_level 0.1
    let out = contact_forces(pair_along_x(-1.0));
    assert_eq!(out.len(), 1, "body force only (no slide without an opposing agent)");
    assert_eq!(out[0].kind, ForceKind::Body);
    let mag = out[0].f.norm();
    assert!((mag - 0.2).abs() < 1e-12, "expected 0.1 + 0.2*0.5 = 0.2, got {mag}");
}

#[test]
fn body_force_continuous_at_calm_zone_boundary() {
    // penetration exactly at overlap_depth: no extra linear term
    let out = contact_forces(pair_along_x(-0.5));
    let mag = out[0].f.norm();
    assert!((mag - 0.1).abs() < 1e-12, "expected exactly overlap_level, got {mag}");

    // just past the boundary the extra term is still tiny
    let out = contact_forces(pair_along_x(-0.5 - 1e-9));
    let mag = out[0].f.norm();
    assert!((mag - 0.1).abs() < 1e-8, "discontinuity at the calm-zone boundary");
}

#[test]
fn sliding_force_is_tangential() {
    let geometry = single_sphere([0.0, 0.0, 0.0], 1.0);
    // contact, neighbor surface at (0.5, 0, 0): contact normal along -x
    let pair = ProximityPair {
        distance: -0.5,
        local_pos: NVec3::new(1.0, 0.0, 0.0),
        other_pos: NVec3::new(0.5, 0.0, 0.0),
        local_hint: 0,
        other_hint: 0,
        other_agent: Some(1),
    };
    // agent 1 moves with (1, 1, 0); local sphere is at rest
    let snapshot = VelocitySnapshot::new(vec![Vec::new(), vec![NVec3::new(1.0, 1.0, 0.0)]]);

    let mut out = Vec::new();
    build_nucleus_forces(
        &ForceParams::default(),
        &geometry,
        &[1.0],
        &[NVec3::zeros()],
        2.0,
        &[pair],
        &snapshot,
        &mut out,
    );

    let slide: Vec<&Force> = out.iter().filter(|f| f.kind == ForceKind::Slide).collect();
    assert_eq!(slide.len(), 1);
    // normal (x) component removed, tangential (y) scaled by slide*w/tau = 0.5
    assert!(slide[0].f.x.abs() < 1e-12, "slide force resists along the normal");
    assert!((slide[0].f.y - 0.5).abs() < 1e-12, "tangential damping wrong: {}", slide[0].f.y);
    assert_eq!(slide[0].f.z, 0.0);
}

// ==================================================================================
// Hinter tests
// ==================================================================================

#[test]
fn hinter_force_rigid_and_scenario_magnitude() {
    let geometry = chain(3);
    // d = 0.5 against the first sphere; a second pair on sphere 1 must be ignored
    let pairs = vec![
        ProximityPair {
            distance: 0.5,
            local_pos: NVec3::new(0.0, -1.0, 0.0),
            other_pos: NVec3::new(0.0, -1.5, 0.0),
            local_hint: 0,
            other_hint: 0,
            other_agent: None,
        },
        ProximityPair {
            distance: 0.2,
            local_pos: NVec3::new(1.5, -1.0, 0.0),
            other_pos: NVec3::new(1.5, -1.2, 0.0),
            local_hint: 1,
            other_hint: 0,
            other_agent: None,
        },
    ];

    let mut out = Vec::new();
    build_hinter_forces(&ForceParams::default(), &geometry, &pairs, &mut out);

    // one identical force per sphere of the chain, nothing from the second pair
    assert_eq!(out.len(), 3);
    let expected = 2.0 * 0.1 * (0.5 * 0.5 * 0.25f64).min(1.0); // 0.0125
    for f in &out {
        assert_eq!(f.kind, ForceKind::Hinter);
        assert!((f.f.norm() - expected).abs() < 1e-12, "got {}", f.f.norm());
        assert!((f.f - out[0].f).norm() < 1e-15, "hinter force not rigid across the chain");
    }
    // pulls toward the hinter (here: -y)
    assert!(out[0].f.y < 0.0);
}

#[test]
fn hinter_force_magnitude_is_clamped() {
    let geometry = chain(1);
    for d in [5.0, 50.0, 5000.0] {
        let pairs = vec![ProximityPair {
            distance: d,
            local_pos: NVec3::zeros(),
            other_pos: NVec3::new(0.0, -d, 0.0),
            local_hint: 0,
            other_hint: 0,
            other_agent: None,
        }];
        let mut out = Vec::new();
        build_hinter_forces(&ForceParams::default(), &geometry, &pairs, &mut out);
        let mag = out[0].f.norm();
        assert!(mag <= 2.0 * 0.1 + 1e-12, "clamp violated at d={d}: {mag}");
    }
}

// ==================================================================================
// Round-driver tests
// ==================================================================================

#[test]
fn publication_inflates_radii_by_cytoplasm_width() {
    let agent = NucleusAgent::new(0, chain(3), ForceParams::default());
    for i in 0..3 {
        let expected = agent.internal().radius(i) + agent.cytoplasm_width();
        assert!(
            (agent.exposed().radius(i) - expected).abs() < 1e-15,
            "exposed radius not internal + margin at sphere {i}"
        );
        assert_eq!(agent.exposed().centre(i), agent.internal().centre(i));
    }
    assert_eq!(agent.exposed().len(), agent.internal().len());
}

#[test]
fn drive_reaches_dt_fraction_after_one_intent_pass() {
    // v_desired = (1,0,0), tau = 2, w = 1, dt = 0.1
    let mut agent = NucleusAgent::new(0, chain(1), ForceParams::default()).with_intent(MotionIntent {
        desired_velocity: NVec3::new(1.0, 0.0, 0.0),
        persistence_time: 2.0,
    });

    agent.advance_and_build_int_forces(0.1);
    agent.adjust_geometry_by_int_forces(0.1);

    let v = agent.velocity_of_sphere(0);
    assert!((v.x - 0.1 * 1.0 / 2.0).abs() < 1e-15, "expected dt*v/tau, got {}", v.x);
    assert_eq!(v.y, 0.0);
}

#[test]
fn velocity_approaches_desired_over_many_ticks() {
    let mut scheduler = Scheduler::new();
    let agent = NucleusAgent::new(0, single_sphere([0.0, 0.0, 0.0], 3.0), ForceParams::default())
        .with_intent(MotionIntent {
            desired_velocity: NVec3::new(1.0, 0.0, 0.0),
            persistence_time: 2.0,
        });
    scheduler.add_nucleus(agent);

    for _ in 0..3000 {
        scheduler.tick(0.01);
    }

    let v = scheduler.nucleus(0).unwrap().velocity_of_sphere(0);
    assert!((v.x - 1.0).abs() < 0.01, "velocity {} did not approach desired 1.0", v.x);
    assert!(v.y.abs() < 1e-9 && v.z.abs() < 1e-9);
}

#[test]
fn overlapping_nuclei_push_apart() {
    let mut scheduler = Scheduler::new();
    // exposed radii are 3 + 2 (cytoplasm); centres 6 apart overlap deeply
    scheduler.add_nucleus(NucleusAgent::new(
        0,
        single_sphere([0.0, 0.0, 0.0], 3.0),
        ForceParams::default(),
    ));
    scheduler.add_nucleus(NucleusAgent::new(
        1,
        single_sphere([6.0, 0.0, 0.0], 3.0),
        ForceParams::default(),
    ));

    let initial = (scheduler.nucleus(1).unwrap().internal().centre(0)
        - scheduler.nucleus(0).unwrap().internal().centre(0))
    .norm();

    for _ in 0..20 {
        scheduler.tick(0.1);
    }

    let after = (scheduler.nucleus(1).unwrap().internal().centre(0)
        - scheduler.nucleus(0).unwrap().internal().centre(0))
    .norm();
    assert!(after > initial, "body force failed to separate nuclei: {initial} -> {after}");
}

#[test]
fn track_pairs_generate_no_forces() {
    let mut agent = NucleusAgent::new(0, chain(1), ForceParams::default());

    let mut batch = ProximityBatch::default();
    batch.to_tracks.push(ProximityPair {
        distance: 0.5,
        local_pos: NVec3::new(1.0, 0.0, 0.0),
        other_pos: NVec3::new(1.5, 0.0, 0.0),
        local_hint: 0,
        other_hint: 0,
        other_agent: None,
    });

    agent.collect_ext_forces(batch, &VelocitySnapshot::new(Vec::new()));

    // only the (zero-velocity) friction entry, nothing track-derived
    assert!(agent
        .force_ledger()
        .iter()
        .all(|f| f.kind == ForceKind::Friction));
}

#[test]
fn full_tick_leaves_ledgers_empty_and_publishes() {
    let mut scheduler = Scheduler::new();
    scheduler.add_nucleus(
        NucleusAgent::new(0, chain(2), ForceParams::default()).with_intent(MotionIntent {
            desired_velocity: NVec3::new(0.3, -0.1, 0.0),
            persistence_time: 2.0,
        }),
    );
    scheduler.add_hinter(single_sphere([0.0, -10.0, 0.0], 6.0));

    scheduler.tick(0.1);

    let agent = scheduler.nucleus(0).unwrap();
    assert!(agent.force_ledger().is_empty(), "ledger survived a full round");
    for i in 0..agent.internal().len() {
        assert_eq!(agent.exposed().centre(i), agent.internal().centre(i));
        assert!(
            (agent.exposed().radius(i) - agent.internal().radius(i) - agent.cytoplasm_width()).abs()
                < 1e-15
        );
    }
    assert!((scheduler.time() - 0.1).abs() < 1e-15);
    assert_eq!(scheduler.tick_count(), 1);
}
