use bevy::prelude::*;

use super::arc_length::{build_sample_table, table_length};
use super::error::LoftError;
use super::mesh_gen::{sweep_profile, ColliderSink, LoftMesh, MeshSink};
use super::query;
use super::types::{BezierPoint, SamplePoint, TextureAxis};

/// Default number of rings swept along the path.
pub const DEFAULT_SEGMENTS: usize = 32;

/// A profile swept along a cubic Bézier path.
///
/// Edits to the authored fields take effect on the next [`Loft::rebuild`].
/// With [`LoftPlugin`](super::LoftPlugin) added, call [`Loft::mark_dirty`]
/// and the mesh and collider are rebuilt once during `PostUpdate`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Loft {
    /// Control points, in path order.
    pub path: Vec<BezierPoint>,
    /// Cross-section offsets, emitted in order at every ring. Not closed.
    pub profile: Vec<Vec3>,
    /// Number of rings along the path, including both ends.
    pub segments: usize,
    /// Which UV coordinate follows the path.
    pub texture_axis: TextureAxis,
    /// Texture given to the surface material if it has none.
    #[reflect(ignore)]
    pub texture: Option<Handle<Image>>,
    samples: Vec<SamplePoint>,
    #[reflect(ignore)]
    mesh: LoftMesh,
    distance: f32,
    dirty: bool,
    texture_applied: bool,
}

impl Default for Loft {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            profile: Vec::new(),
            segments: DEFAULT_SEGMENTS,
            texture_axis: TextureAxis::default(),
            texture: None,
            samples: Vec::new(),
            mesh: LoftMesh::default(),
            distance: 0.0,
            dirty: false,
            texture_applied: false,
        }
    }
}

impl Loft {
    /// Create a loft that is built on its first tick.
    pub fn new(path: Vec<BezierPoint>, profile: Vec<Vec3>) -> Self {
        Self {
            path,
            profile,
            dirty: true,
            ..default()
        }
    }

    /// Set the number of rings.
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Set the UV axis along the path.
    pub fn with_texture_axis(mut self, axis: TextureAxis) -> Self {
        self.texture_axis = axis;
        self
    }

    /// Set the fallback surface texture.
    pub fn with_texture(mut self, texture: Handle<Image>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Request a rebuild on the next tick.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Chordal length of the last built sample table.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Number of vertices in the last built mesh.
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// The last built sample table.
    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    /// The last built buffers.
    pub fn mesh(&self) -> &LoftMesh {
        &self.mesh
    }

    /// Check the segment, profile and path counts.
    pub fn validate(&self) -> Result<(), LoftError> {
        if self.segments < 2 {
            return Err(LoftError::TooFewSegments {
                segments: self.segments,
            });
        }
        if self.profile.len() < 2 {
            return Err(LoftError::TooFewProfileVertices {
                count: self.profile.len(),
            });
        }
        if self.path.len() < 2 {
            return Err(LoftError::TooFewControlPoints {
                count: self.path.len(),
            });
        }
        Ok(())
    }

    /// Regenerate the sample table and buffers without touching any sink.
    ///
    /// Returns `Ok(false)` and leaves everything untouched when the path or
    /// profile is empty. On error the previous table and buffers are kept.
    pub fn rebuild_buffers(&mut self) -> Result<bool, LoftError> {
        self.dirty = false;

        if self.path.is_empty() || self.profile.is_empty() {
            return Ok(false);
        }
        self.validate()?;

        let samples = build_sample_table(&mut self.path, self.segments);
        let mesh = sweep_profile(&samples, &self.profile, self.texture_axis);

        self.distance = table_length(&samples);
        self.samples = samples;
        self.mesh = mesh;

        debug!(
            "rebuilt loft: {} rings, {} vertices, {} triangles, distance {:.3}",
            self.samples.len(),
            self.mesh.vertex_count(),
            self.mesh.triangle_count(),
            self.distance,
        );

        Ok(true)
    }

    /// Regenerate everything and hand the new buffers to the sinks.
    ///
    /// The collider is cleared before it is reassigned so hosts that only
    /// react to a changed shape pick up the new one.
    pub fn rebuild<M, C>(&mut self, mesh_sink: &mut M, collider_sink: &mut C) -> Result<bool, LoftError>
    where
        M: MeshSink + ?Sized,
        C: ColliderSink + ?Sized,
    {
        if !self.rebuild_buffers()? {
            return Ok(false);
        }

        mesh_sink.replace_mesh(&self.mesh);
        collider_sink.clear_collider();
        collider_sink.assign_collider(&self.mesh);

        Ok(true)
    }

    /// The fallback texture, until it has been offered to a material.
    pub fn default_texture(&self) -> Option<&Handle<Image>> {
        if self.texture_applied {
            return None;
        }
        self.texture.as_ref()
    }

    /// Record that the surface material has been checked for a texture, so
    /// [`Loft::default_texture`] stops offering it.
    pub fn mark_texture_applied(&mut self) {
        self.texture_applied = true;
    }

    /// Position at `alpha` (clamped to 0..=1) of the built path length,
    /// interpolated between samples. Zero before the first build.
    pub fn position_at_alpha(&self, alpha: f32) -> Vec3 {
        query::position_at_alpha(&self.samples, alpha)
    }

    /// Heading in radians of the sample nearest `alpha`. Not interpolated.
    pub fn heading_at_alpha(&self, alpha: f32) -> f32 {
        query::heading_at_alpha(&self.samples, alpha)
    }

    /// Yaw rotation of the sample nearest `alpha`, matching the rotation
    /// applied to the profile there.
    pub fn rotation_at_alpha(&self, alpha: f32) -> Quat {
        query::rotation_at_alpha(&self.samples, alpha)
    }

    /// Exact curve position between two control points, bypassing the
    /// sample table. `None` if either index is out of range.
    pub fn position_between(&self, from: usize, to: usize, t: f32) -> Option<Vec3> {
        query::position_between(&self.path, from, to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loft::arc_length::straight_path;

    #[derive(Default)]
    struct RecordingMeshSink {
        replaced: Vec<LoftMesh>,
    }

    impl MeshSink for RecordingMeshSink {
        fn replace_mesh(&mut self, mesh: &LoftMesh) {
            self.replaced.push(mesh.clone());
        }
    }

    #[derive(Default)]
    struct RecordingColliderSink {
        calls: Vec<&'static str>,
        vertices: usize,
    }

    impl ColliderSink for RecordingColliderSink {
        fn clear_collider(&mut self) {
            self.calls.push("clear");
            self.vertices = 0;
        }

        fn assign_collider(&mut self, mesh: &LoftMesh) {
            self.calls.push("assign");
            self.vertices = mesh.vertex_count();
        }
    }

    fn bar_loft(segments: usize) -> Loft {
        Loft::new(
            straight_path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]),
            vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
        )
        .with_segments(segments)
    }

    #[test]
    fn test_straight_bar() {
        let mut loft = bar_loft(3);
        assert!(loft.is_dirty());

        assert_eq!(loft.rebuild_buffers(), Ok(true));
        assert!(!loft.is_dirty());
        assert_eq!(loft.vertex_count(), 6);
        assert_eq!(loft.samples().len(), 3);
        assert!((loft.distance() - 10.0).abs() < 1e-4);
        assert!((loft.position_at_alpha(0.5) - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_sinks_receive_mesh_and_collider_is_reset() {
        let mut loft = bar_loft(4);
        let mut mesh_sink = RecordingMeshSink::default();
        let mut collider_sink = RecordingColliderSink::default();

        assert_eq!(loft.rebuild(&mut mesh_sink, &mut collider_sink), Ok(true));
        assert_eq!(mesh_sink.replaced.len(), 1);
        assert_eq!(mesh_sink.replaced[0], *loft.mesh());
        assert_eq!(collider_sink.calls, vec!["clear", "assign"]);
        assert_eq!(collider_sink.vertices, 8);
    }

    #[test]
    fn test_empty_input_is_silent_noop() {
        let mut loft = Loft::new(Vec::new(), vec![Vec3::X, Vec3::NEG_X]);
        let mut mesh_sink = RecordingMeshSink::default();
        let mut collider_sink = RecordingColliderSink::default();

        assert_eq!(loft.rebuild(&mut mesh_sink, &mut collider_sink), Ok(false));
        assert!(mesh_sink.replaced.is_empty());
        assert!(collider_sink.calls.is_empty());
        assert_eq!(loft.vertex_count(), 0);
        assert_eq!(loft.position_at_alpha(0.5), Vec3::ZERO);
        assert_eq!(loft.rotation_at_alpha(0.5), Quat::IDENTITY);

        let mut loft = bar_loft(3);
        loft.profile.clear();
        assert_eq!(loft.rebuild_buffers(), Ok(false));
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let mut loft = bar_loft(1);
        let err = loft.rebuild_buffers().unwrap_err();
        assert_eq!(err, LoftError::TooFewSegments { segments: 1 });
        assert!(err.is_invalid_configuration());

        let mut loft = bar_loft(3);
        loft.profile.truncate(1);
        assert_eq!(
            loft.rebuild_buffers(),
            Err(LoftError::TooFewProfileVertices { count: 1 })
        );

        let mut loft = bar_loft(3);
        loft.path.truncate(1);
        assert_eq!(
            loft.rebuild_buffers(),
            Err(LoftError::TooFewControlPoints { count: 1 })
        );
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_buffers() {
        let mut loft = bar_loft(3);
        loft.rebuild_buffers().unwrap();
        let before = loft.mesh().clone();

        loft.segments = 0;
        loft.mark_dirty();
        assert!(loft.rebuild_buffers().is_err());
        assert!(!loft.is_dirty());
        assert_eq!(*loft.mesh(), before);
        assert_eq!(loft.samples().len(), 3);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let mut loft = Loft::new(
            vec![
                BezierPoint::new(0, Vec3::ZERO, Vec3::ZERO, Vec3::new(2.0, 1.0, 4.0)),
                BezierPoint::new(1, Vec3::new(6.0, 0.0, 5.0), Vec3::new(8.0, 0.0, 1.0), Vec3::new(10.0, 0.0, -3.0)),
                BezierPoint::new(2, Vec3::new(12.0, 2.0, -2.0), Vec3::new(15.0, 0.0, 0.0), Vec3::ZERO),
            ],
            vec![
                Vec3::new(0.0, 0.0, -2.0),
                Vec3::new(0.0, 0.5, -1.0),
                Vec3::new(0.0, 0.5, 1.0),
                Vec3::new(0.0, 0.0, 2.0),
            ],
        )
        .with_segments(24);

        loft.rebuild_buffers().unwrap();
        let first = loft.mesh().clone();
        loft.rebuild_buffers().unwrap();

        assert_eq!(*loft.mesh(), first);
        assert_eq!(first.vertex_count(), 24 * 4);
        assert_eq!(first.triangle_count(), 2 * 3 * 23);
    }

    #[test]
    fn test_alpha_queries_hit_sample_ends() {
        let mut loft = Loft::new(
            vec![
                BezierPoint::new(0, Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)),
                BezierPoint::new(1, Vec3::new(9.0, 0.0, 6.0), Vec3::new(9.0, 1.0, 0.0), Vec3::ZERO),
            ],
            vec![Vec3::NEG_Z, Vec3::Z],
        )
        .with_segments(10);
        loft.rebuild_buffers().unwrap();

        let samples = loft.samples();
        assert_eq!(loft.position_at_alpha(0.0), samples[0].position);
        assert_eq!(loft.position_at_alpha(1.0), samples[9].position);
        assert_eq!(loft.position_at_alpha(-0.1), samples[0].position);
        assert_eq!(loft.position_at_alpha(1.1), samples[9].position);
    }

    #[test]
    fn test_position_between_control_points() {
        let loft = Loft::new(
            vec![
                BezierPoint::new(0, Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 3.0, 0.0)),
                BezierPoint::new(1, Vec3::new(4.0, 3.0, 0.0), Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO),
            ],
            vec![Vec3::NEG_Z, Vec3::Z],
        );

        assert_eq!(loft.position_between(0, 1, 0.0), Some(Vec3::ZERO));
        assert_eq!(loft.position_between(0, 1, 1.0), Some(Vec3::new(5.0, 0.0, 0.0)));
        let mid = loft.position_between(0, 1, 0.5).unwrap();
        assert!((mid - Vec3::new(2.5, 2.25, 0.0)).length() < 1e-5);
        assert_eq!(loft.position_between(0, 2, 0.5), None);
    }

    #[test]
    fn test_default_texture_offered_until_applied() {
        let mut loft = bar_loft(3).with_texture(Handle::default());
        assert!(loft.default_texture().is_some());
        assert!(loft.default_texture().is_some());

        loft.mark_texture_applied();
        assert!(loft.default_texture().is_none());
        assert!(bar_loft(3).default_texture().is_none());
    }
}
