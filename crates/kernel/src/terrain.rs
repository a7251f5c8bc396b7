use crate::raycast::{Ray, RayHit, intersect_triangle};
use glam::Vec3;

/// Side length of the square ground plane, in world units.
pub const GROUND_SIZE: f32 = 60.0;
/// Number of quads along each side of the ground plane.
pub const GROUND_SEGMENTS: u32 = 20;

/// Height of the rippled ground at a horizontal position.
pub fn ripple_height(x: f32, z: f32) -> f32 {
    (x * 0.15).sin() * 0.3 + (z * 0.15).cos() * 0.3
}

/// The rippled ground: a regular grid of vertices displaced by
/// [`ripple_height`] and split into upward-facing triangles.
#[derive(Debug, Clone)]
pub struct Terrain {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl Default for Terrain {
    fn default() -> Self {
        Self::rippled(GROUND_SIZE, GROUND_SEGMENTS)
    }
}

impl Terrain {
    /// Build a `size` × `size` ground centred on the origin with `segments`
    /// quads per side.
    pub fn rippled(size: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let half = size / 2.0;
        let step = size / segments as f32;
        let row = segments + 1;

        let mut positions = Vec::with_capacity((row * row) as usize);
        for iz in 0..row {
            let z = iz as f32 * step - half;
            for ix in 0..row {
                let x = ix as f32 * step - half;
                positions.push(Vec3::new(x, ripple_height(x, z), z));
            }
        }

        let mut triangles = Vec::with_capacity((segments * segments * 2) as usize);
        for iz in 0..segments {
            for ix in 0..segments {
                let a = ix + row * iz;
                let b = ix + row * (iz + 1);
                let c = (ix + 1) + row * (iz + 1);
                let d = (ix + 1) + row * iz;
                triangles.push([a, b, d]);
                triangles.push([b, c, d]);
            }
        }

        Self {
            positions,
            triangles,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Area-weighted vertex normals, for shading.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for &[a, b, c] in &self.triangles {
            let (pa, pb, pc) = self.corners(a, b, c);
            let n = (pb - pa).cross(pc - pa);
            for i in [a, b, c] {
                normals[i as usize] += n;
            }
        }
        normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect()
    }

    /// Nearest front-facing hit closer than `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.triangles
            .iter()
            .filter_map(|&[a, b, c]| {
                let (pa, pb, pc) = self.corners(a, b, c);
                intersect_triangle(ray, pa, pb, pc)
            })
            .filter(|hit| hit.distance < max_distance)
            .min_by(|x, y| x.distance.total_cmp(&y.distance))
    }

    fn corners(&self, a: u32, b: u32, c: u32) -> (Vec3, Vec3, Vec3) {
        (
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_dimensions() {
        let t = Terrain::default();
        assert_eq!(t.positions().len(), 21 * 21);
        assert_eq!(t.triangles().len(), 20 * 20 * 2);
        assert_eq!(t.positions()[0].x, -30.0);
        assert_eq!(t.positions()[0].z, -30.0);
        assert_eq!(t.positions()[t.positions().len() - 1].x, 30.0);
    }

    #[test]
    fn heights_follow_ripple() {
        let t = Terrain::default();
        for p in t.positions() {
            assert!((p.y - ripple_height(p.x, p.z)).abs() < 1e-6);
            assert!(p.y.abs() <= 0.6 + 1e-6);
        }
    }

    #[test]
    fn triangles_face_up() {
        let t = Terrain::default();
        for &[a, b, c] in t.triangles() {
            let (pa, pb, pc) = t.corners(a, b, c);
            assert!((pb - pa).cross(pc - pa).y > 0.0);
        }
        assert!(t.vertex_normals().iter().all(|n| n.y > 0.9));
    }

    #[test]
    fn downward_ray_hits_ground() {
        let t = Terrain::default();
        let ray = Ray::new(Vec3::new(3.2, 2.0, 4.1), Vec3::NEG_Y);
        let hit = t.raycast(&ray, 6.0).unwrap();
        assert!((hit.point.y - ripple_height(3.2, 4.1)).abs() < 0.05);
        assert!(hit.normal.y > 0.9);
    }

    #[test]
    fn ground_out_of_reach_is_missed() {
        let t = Terrain::default();
        let ray = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::NEG_Y);
        assert!(t.raycast(&ray, 6.0).is_none());
    }

    #[test]
    fn ground_is_not_hit_from_below() {
        let t = Terrain::default();
        let ray = Ray::new(Vec3::new(1.0, -3.0, 1.0), Vec3::Y);
        assert!(t.raycast(&ray, 6.0).is_none());
    }
}
