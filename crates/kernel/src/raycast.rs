use glam::Vec3;

/// A half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized (a zero vector stays zero and
    /// hits nothing).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection of a ray with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    /// Unit normal of the surface that was hit, facing the ray origin.
    pub normal: Vec3,
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The unit cube centred on `center`.
    pub fn unit_cube(center: Vec3) -> Self {
        Self {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    /// Slab test against the outside of the box.
    ///
    /// Only entering faces count: a ray starting inside the box misses it.
    /// The hit point is placed exactly on the entered face plane.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_axis = None;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            if d == 0.0 {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (self.min[axis] - o) * inv;
            let mut t1 = (self.max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_near {
                t_near = t0;
                near_axis = Some(axis);
            }
            t_far = t_far.min(t1);
        }

        let axis = near_axis?;
        if t_near > t_far || t_near < 0.0 {
            return None;
        }

        let d = ray.direction[axis];
        let mut point = ray.at(t_near);
        let mut normal = Vec3::ZERO;
        if d > 0.0 {
            point[axis] = self.min[axis];
            normal[axis] = -1.0;
        } else {
            point[axis] = self.max[axis];
            normal[axis] = 1.0;
        }

        Some(RayHit {
            distance: t_near,
            point,
            normal,
        })
    }
}

/// Ray/triangle intersection (Möller–Trumbore) with back-face culling.
///
/// The front face is the one whose normal `(b - a) × (c - a)` points towards
/// the ray origin.
pub fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<RayHit> {
    const EPSILON: f32 = 1e-7;

    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det <= EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - a;
    let u = tvec.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = tvec.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    if t < 0.0 {
        return None;
    }

    Some(RayHit {
        distance: t,
        point: ray.at(t),
        normal: edge1.cross(edge2).normalize(),
    })
}
