//! Sphere-chain geometry for nucleus agents
//!
//! A nucleus is represented as an ordered sequence of spheres
//! (`Spheres`), each sphere a (centre, radius) pair addressed by index,
//! together with a cached axis-aligned bounding box (`Aabb`) that is
//! refreshed after every geometric change.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Normalize `v` to unit length, or return the zero vector when `v` has
/// (near-)zero length. Coincident surface points must never produce NaN.
pub fn unit_or_zero(v: NVec3) -> NVec3 {
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        NVec3::zeros()
    }
}

/// Axis-aligned bounding box, cached per geometry and used by the
/// scheduler's neighbor query.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: NVec3,
    pub max: NVec3,
}

impl Aabb {
    /// An inverted box that any `expand_sphere` call will overwrite
    pub fn empty() -> Self {
        Self {
            min: NVec3::from_element(f64::INFINITY),
            max: NVec3::from_element(f64::NEG_INFINITY),
        }
    }

    /// Grow the box to enclose the sphere (`centre`, `radius`)
    pub fn expand_sphere(&mut self, centre: &NVec3, radius: f64) {
        for k in 0..3 {
            self.min[k] = self.min[k].min(centre[k] - radius);
            self.max[k] = self.max[k].max(centre[k] + radius);
        }
    }

    /// Smallest distance between two boxes, 0.0 when they touch or overlap
    pub fn min_distance(&self, other: &Aabb) -> f64 {
        let mut gap = NVec3::zeros();
        for k in 0..3 {
            // per-axis separation; negative values mean the intervals overlap
            let g = (other.min[k] - self.max[k]).max(self.min[k] - other.max[k]);
            gap[k] = g.max(0.0);
        }
        gap.norm()
    }
}

/// Ordered chain of spheres representing one nucleus
///
/// `centres` and `radii` always have equal length; the cached `aabb`
/// encloses every sphere and must be refreshed (`update_aabb`) after any
/// change to centres or radii.
#[derive(Debug, Clone)]
pub struct Spheres {
    centres: Vec<NVec3>,
    radii: Vec<f64>,
    pub aabb: Aabb,
}

impl Spheres {
    pub fn new(centres: Vec<NVec3>, radii: Vec<f64>) -> Self {
        debug_assert_eq!(centres.len(), radii.len(), "centre/radius count mismatch");
        let mut s = Self {
            centres,
            radii,
            aabb: Aabb::empty(),
        };
        s.update_aabb();
        s
    }

    /// Number of spheres in the chain
    pub fn len(&self) -> usize {
        self.centres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centres.is_empty()
    }

    pub fn centre(&self, i: usize) -> NVec3 {
        debug_assert!(i < self.centres.len(), "sphere index out of bounds");
        self.centres[i]
    }

    pub fn radius(&self, i: usize) -> f64 {
        debug_assert!(i < self.radii.len(), "sphere index out of bounds");
        self.radii[i]
    }

    pub fn centres(&self) -> &[NVec3] {
        &self.centres
    }

    pub fn centres_mut(&mut self) -> &mut [NVec3] {
        &mut self.centres
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Move the whole chain by `delta` and refresh the bounding box
    pub fn translate(&mut self, delta: &NVec3) {
        for c in self.centres.iter_mut() {
            *c += delta;
        }
        self.update_aabb();
    }

    /// Recompute the cached bounding box from the current spheres
    pub fn update_aabb(&mut self) {
        self.aabb = Aabb::empty();
        for (c, r) in self.centres.iter().zip(self.radii.iter()) {
            self.aabb.expand_sphere(c, *r);
        }
    }

    /// Index of the first sphere containing `point`, skipping `ignore`
    /// when given. Used by mask-rendering collaborators, not by the
    /// force engine itself.
    pub fn collide_with_point(&self, point: &NVec3, ignore: Option<usize>) -> Option<usize> {
        for i in 0..self.centres.len() {
            if ignore == Some(i) {
                continue;
            }
            if (point - self.centres[i]).norm() <= self.radii[i] {
                return Some(i);
            }
        }
        None
    }

    /// Publication projection: copy `internal`'s centres, inflate every
    /// radius by `margin` (the cytoplasm width), refresh the box.
    /// `internal` is never mutated; both chains keep the same sphere count.
    pub fn publish_from(&mut self, internal: &Spheres, margin: f64) {
        debug_assert_eq!(
            self.centres.len(),
            internal.centres.len(),
            "exposed/internal sphere count mismatch"
        );
        for i in 0..internal.centres.len() {
            self.centres[i] = internal.centres[i];
            self.radii[i] = internal.radii[i] + margin;
        }
        self.update_aabb();
    }
}
