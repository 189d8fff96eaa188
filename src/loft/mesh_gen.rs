use avian3d::prelude::*;
use bevy::{
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};

use super::components::Loft;
use super::types::{SamplePoint, TextureAxis};

/// Vertex, triangle and UV buffers produced by a loft rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoftMesh {
    pub positions: Vec<Vec3>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    pub uvs: Vec<Vec2>,
}

impl LoftMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the index buffer as triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Convert into a render mesh with recomputed normals.
    pub fn to_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self.positions.iter().map(|p| p.to_array()).collect();
        let uvs: Vec<[f32; 2]> = self.uvs.iter().map(|uv| uv.to_array()).collect();

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh.compute_normals();

        mesh
    }

    /// Build a trimesh collider from the same buffers.
    pub fn to_collider(&self) -> Collider {
        Collider::trimesh(self.positions.clone(), self.triangles().collect())
    }
}

/// Receives the render geometry of every successful rebuild.
pub trait MeshSink {
    /// Replace all vertex, index and UV data and recompute normals.
    fn replace_mesh(&mut self, mesh: &LoftMesh);
}

/// Receives the collision geometry of every successful rebuild.
pub trait ColliderSink {
    fn clear_collider(&mut self);
    fn assign_collider(&mut self, mesh: &LoftMesh);
}

impl MeshSink for Mesh {
    fn replace_mesh(&mut self, mesh: &LoftMesh) {
        *self = mesh.to_mesh();
    }
}

/// Collider produced by a rebuild, waiting to be inserted on the entity.
#[derive(Default)]
pub struct ColliderSlot(pub Option<Collider>);

impl ColliderSink for ColliderSlot {
    fn clear_collider(&mut self) {
        self.0 = None;
    }

    fn assign_collider(&mut self, mesh: &LoftMesh) {
        self.0 = Some(mesh.to_collider());
    }
}

/// Sweep `profile` along the sample table.
///
/// Each sample emits one ring: every profile offset rotated by the sample's
/// heading about +Y and moved to the sample position. U runs along the path
/// by refined distance, V across the profile by vertex index, swapped for
/// [`TextureAxis::X`].
///
/// Needs at least two samples and two profile vertices to emit triangles.
pub fn sweep_profile(samples: &[SamplePoint], profile: &[Vec3], axis: TextureAxis) -> LoftMesh {
    let ring_len = profile.len();
    let total_vertices = samples.len() * ring_len;

    let mut positions = Vec::with_capacity(total_vertices);
    for sample in samples {
        let rotation = sample.rotation();
        for offset in profile {
            positions.push(rotation * *offset + sample.position);
        }
    }

    let indices = ring_indices(ring_len, samples.len());

    let total = samples.last().map(|s| s.distance).unwrap_or(0.0);
    let across_steps = ring_len.saturating_sub(1).max(1) as f32;
    let mut uvs = Vec::with_capacity(total_vertices);
    for index in 0..positions.len() {
        let ring = index / ring_len;
        let along = if total > 0.0 {
            samples[ring].distance / total
        } else {
            0.0
        };
        let across = (index % ring_len) as f32 / across_steps;
        uvs.push(Vec2::from_array(axis.uv(along, across)));
    }

    LoftMesh {
        positions,
        indices,
        uvs,
    }
}

/// Triangle list stitching consecutive rings of `ring_len` vertices.
///
/// Walks every vertex slot except the last ring. The first column adds the
/// triangle above-left of its quad, the last column the one below-right,
/// middle columns add both.
fn ring_indices(ring_len: usize, rings: usize) -> Vec<u32> {
    if ring_len < 2 || rings < 2 {
        return Vec::new();
    }

    let n = ring_len as u32;
    let slots = ring_len * (rings - 1);
    let mut indices = Vec::with_capacity(slots * 6);

    for k in 0..slots as u32 {
        let column = k % n;
        if column == 0 {
            indices.extend_from_slice(&[k + n, k + 1, k]);
        } else if column == n - 1 {
            indices.extend_from_slice(&[k + n, k, k + n - 1]);
        } else {
            indices.extend_from_slice(&[k + n, k, k + n - 1]);
            indices.extend_from_slice(&[k + n, k + 1, k]);
        }
    }

    indices
}

/// Rebuild every dirty loft once, feeding its `Mesh3d` asset and `Collider`.
///
/// Entities get a mesh asset only once a rebuild succeeds. A loft's fallback
/// texture goes to its `StandardMaterial` if that material has no base color
/// texture; it is offered again on later rebuilds until a material is found.
pub fn rebuild_dirty_lofts(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut lofts: Query<(
        Entity,
        &mut Loft,
        Option<&Mesh3d>,
        Option<&MeshMaterial3d<StandardMaterial>>,
    )>,
) {
    for (entity, mut loft, mesh3d, material) in &mut lofts {
        if !loft.is_dirty() {
            continue;
        }

        let mut collider = ColliderSlot::default();
        let result = match mesh3d.and_then(|handle| meshes.get_mut(&handle.0)) {
            Some(mesh) => loft.rebuild(mesh, &mut collider),
            None => {
                let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());
                let result = loft.rebuild(&mut mesh, &mut collider);
                if let Ok(true) = result {
                    commands.entity(entity).insert(Mesh3d(meshes.add(mesh)));
                }
                result
            }
        };

        match result {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => {
                warn!("loft {entity:?} was not rebuilt: {err}");
                continue;
            }
        }

        let mut entity_commands = commands.entity(entity);
        entity_commands.remove::<Collider>();
        if let Some(collider) = collider.0 {
            entity_commands.insert(collider);
        }

        let Some(texture) = loft.default_texture().cloned() else {
            continue;
        };
        if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
            if material.base_color_texture.is_none() {
                material.base_color_texture = Some(texture);
            }
            loft.mark_texture_applied();
        }
    }
}
