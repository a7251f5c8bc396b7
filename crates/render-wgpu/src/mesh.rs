//! CPU-side geometry for the GPU passes.

use crate::palette;
use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};
use voxelbox_assets::TextureLibrary;
use voxelbox_common::Face;
use voxelbox_kernel::{Terrain, World};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// [`Face::slot`] of the face this vertex belongs to.
    pub face: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct BlockInstance {
    pub translation: [f32; 3],
    pub opacity: f32,
    /// Texture-array layers for faces 0..4.
    pub layers_a: [u32; 4],
    /// Texture-array layers for faces 4..6.
    pub layers_b: [u32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Corners of one cube face as seen from outside: bottom-left, bottom-right,
/// top-right, top-left.
fn face_corners(face: Face) -> [[f32; 3]; 4] {
    let p = 0.5_f32;
    match face {
        Face::PosX => [[p, -p, p], [p, -p, -p], [p, p, -p], [p, p, p]],
        Face::NegX => [[-p, -p, -p], [-p, -p, p], [-p, p, p], [-p, p, -p]],
        Face::PosY => [[-p, p, p], [p, p, p], [p, p, -p], [-p, p, -p]],
        Face::NegY => [[-p, -p, -p], [p, -p, -p], [p, -p, p], [-p, -p, p]],
        Face::PosZ => [[-p, -p, p], [p, -p, p], [p, p, p], [-p, p, p]],
        Face::NegZ => [[p, -p, -p], [-p, -p, -p], [-p, p, -p], [p, p, -p]],
    }
}

/// Unit cube centred on the origin, four vertices per face in slot order.
pub(crate) fn cube_mesh() -> (Vec<CubeVertex>, Vec<u16>) {
    const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for face in Face::ALL {
        let base = vertices.len() as u16;
        let normal = face.normal().to_array();
        for (corner, uv) in face_corners(face).into_iter().zip(UVS) {
            vertices.push(CubeVertex {
                position: corner,
                normal,
                uv,
                face: face.slot() as u32,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// Per-block instance data, opaque blocks first. Translucent blocks are
/// sorted far to near from `eye`. Returns the data and the opaque count.
pub(crate) fn block_instances(
    world: &World,
    textures: &TextureLibrary,
    eye: Vec3,
) -> (Vec<BlockInstance>, usize) {
    let mut opaque = Vec::new();
    let mut translucent = Vec::new();
    for mesh in world.meshes() {
        let layers = textures.block_layers(mesh.block);
        let instance = BlockInstance {
            translation: mesh.center.to_array(),
            opacity: mesh.block.opacity(),
            layers_a: [layers[0], layers[1], layers[2], layers[3]],
            layers_b: [layers[4], layers[5]],
        };
        if mesh.is_translucent() {
            translucent.push((mesh.center.distance_squared(eye), instance));
        } else {
            opaque.push(instance);
        }
    }
    translucent.sort_by(|a, b| b.0.total_cmp(&a.0));

    let opaque_count = opaque.len();
    opaque.extend(translucent.into_iter().map(|(_, instance)| instance));
    (opaque, opaque_count)
}

pub(crate) fn terrain_mesh(terrain: &Terrain) -> (Vec<TerrainVertex>, Vec<u32>) {
    let vertices = terrain
        .positions()
        .iter()
        .zip(terrain.vertex_normals())
        .map(|(p, n)| TerrainVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect();
    let indices = terrain.triangles().iter().flatten().copied().collect();
    (vertices, indices)
}

/// Twelve edges of the cell at `cell`, as a line list.
pub(crate) fn outline_mesh(cell: IVec3) -> Vec<LineVertex> {
    // Slightly oversized so the lines win the depth test against a
    // neighbouring block face.
    let h = 0.502_f32;
    let c = cell.as_vec3();
    let color = palette::linear_rgba(palette::OUTLINE, 1.0);
    let corner = |x: f32, y: f32, z: f32| LineVertex {
        position: (c + Vec3::new(x, y, z) * h).to_array(),
        color,
    };

    let mut verts = Vec::with_capacity(24);
    for &(a, b) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        // along X
        verts.push(corner(-1.0, a, b));
        verts.push(corner(1.0, a, b));
        // along Y
        verts.push(corner(a, -1.0, b));
        verts.push(corner(a, 1.0, b));
        // along Z
        verts.push(corner(a, b, -1.0));
        verts.push(corner(a, b, 1.0));
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelbox_common::{BlockRecord, BlockType};

    fn v(a: [f32; 3]) -> Vec3 {
        Vec3::from_array(a)
    }

    #[test]
    fn cube_faces_wind_outward_in_slot_order() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| vertices[i as usize]);
            assert_eq!(a.face, b.face);
            assert_eq!(b.face, c.face);
            let face = Face::ALL[a.face as usize];
            let winding = (v(b.position) - v(a.position))
                .cross(v(c.position) - v(a.position))
                .normalize();
            assert!((winding - face.normal()).length() < 1e-5);
            assert_eq!(v(a.normal), face.normal());
        }
    }

    #[test]
    fn side_faces_put_texture_top_up() {
        let (vertices, _) = cube_mesh();
        for vertex in vertices.iter().filter(|v| v.normal[1] == 0.0) {
            let top = vertex.position[1] > 0.0;
            assert_eq!(vertex.uv[1] == 0.0, top);
        }
    }

    #[test]
    fn glass_is_drawn_after_opaque_far_to_near() {
        let mut world = World::new();
        world.place(BlockRecord::new(IVec3::new(0, 0, -1), BlockType::Glass));
        world.place(BlockRecord::new(IVec3::new(5, 0, 0), BlockType::Stone));
        world.place(BlockRecord::new(IVec3::new(0, 0, -8), BlockType::Glass));
        let textures = TextureLibrary::blank();

        let (instances, opaque) = block_instances(&world, &textures, Vec3::ZERO);
        assert_eq!(instances.len(), 3);
        assert_eq!(opaque, 1);
        assert_eq!(instances[0].translation, [5.0, 0.0, 0.0]);
        assert_eq!(instances[0].opacity, 1.0);
        assert_eq!(instances[1].translation, [0.0, 0.0, -8.0]);
        assert_eq!(instances[2].translation, [0.0, 0.0, -1.0]);
        assert!((instances[2].opacity - 0.55).abs() < 1e-6);
    }

    #[test]
    fn instance_layers_follow_face_slots() {
        let mut world = World::new();
        world.place(BlockRecord::new(IVec3::ZERO, BlockType::Grass));
        let textures = TextureLibrary::blank();
        let (instances, _) = block_instances(&world, &textures, Vec3::ZERO);
        let layers = textures.block_layers(BlockType::Grass);
        assert_eq!(instances[0].layers_a, [layers[0], layers[1], layers[2], layers[3]]);
        assert_eq!(instances[0].layers_b, [layers[4], layers[5]]);
        assert_ne!(layers[Face::PosY.slot()], layers[Face::PosX.slot()]);
    }

    #[test]
    fn terrain_mesh_matches_terrain() {
        let terrain = Terrain::default();
        let (vertices, indices) = terrain_mesh(&terrain);
        assert_eq!(vertices.len(), terrain.positions().len());
        assert_eq!(indices.len(), terrain.triangles().len() * 3);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        assert!(vertices.iter().all(|v| v.normal[1] > 0.9));
    }

    #[test]
    fn outline_surrounds_cell() {
        let verts = outline_mesh(IVec3::new(3, 1, 4));
        assert_eq!(verts.len(), 24);
        let center = Vec3::new(3.0, 1.0, 4.0);
        for vert in &verts {
            let d = (v(vert.position) - center).abs();
            assert!((d.x - 0.502).abs() < 1e-5);
            assert!((d.y - 0.502).abs() < 1e-5);
            assert!((d.z - 0.502).abs() < 1e-5);
        }
        for edge in verts.chunks(2) {
            assert!((v(edge[0].position).distance(v(edge[1].position)) - 1.004).abs() < 1e-4);
        }
    }
}
