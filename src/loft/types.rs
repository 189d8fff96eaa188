use bevy::prelude::*;

/// Which UV axis runs along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum TextureAxis {
    /// U follows the path, V runs across the profile.
    #[default]
    Z,
    /// U runs across the profile, V follows the path.
    X,
}

impl TextureAxis {
    /// Arrange the along-path and across-profile coordinates into a UV pair.
    pub fn uv(self, along: f32, across: f32) -> [f32; 2] {
        match self {
            Self::Z => [along, across],
            Self::X => [across, along],
        }
    }
}

/// A path control point with its two tangent handles.
///
/// Handles are stored as absolute world positions: the segment between
/// points `a` and `b` is the cubic Bézier
/// `a.position, a.handle_out, b.handle_in, b.position`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct BezierPoint {
    /// Authoring index of this point.
    pub id: usize,
    /// The point the curve passes through.
    pub position: Vec3,
    /// Control point shaping the segment arriving at this point.
    pub handle_in: Vec3,
    /// Control point shaping the segment leaving this point.
    pub handle_out: Vec3,
    /// Estimated distance from the path start, refreshed on every rebuild.
    pub distance: f32,
}

impl BezierPoint {
    pub fn new(id: usize, handle_in: Vec3, position: Vec3, handle_out: Vec3) -> Self {
        Self {
            id,
            position,
            handle_in,
            handle_out,
            distance: 0.0,
        }
    }

    /// Build a point whose handles are given as offsets from `position`.
    pub fn from_offsets(id: usize, position: Vec3, in_offset: Vec3, out_offset: Vec3) -> Self {
        Self::new(id, position + in_offset, position, position + out_offset)
    }

    /// Point with both handles on the point itself (a straight segment when
    /// both ends of a segment are like this).
    pub fn corner(id: usize, position: Vec3) -> Self {
        Self::new(id, position, position, position)
    }

    /// Key/value dump of the three positions, for debug output only.
    pub fn debug_block(&self) -> String {
        format!(
            "{{\n\"handle_in\":\"{}\",\n\"position\":\"{}\",\n\"handle_out\":\"{}\"\n}}",
            format_vec3(self.handle_in),
            format_vec3(self.position),
            format_vec3(self.handle_out),
        )
    }
}

fn format_vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// One ring position of the resampled path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct SamplePoint {
    /// Index of the ring emitted at this sample.
    pub ring: usize,
    /// Chordal distance from the first sample.
    pub distance: f32,
    /// World position on the curve.
    pub position: Vec3,
    /// Yaw in the XZ plane, radians.
    pub heading: f32,
}

impl SamplePoint {
    /// Rotation applied to the profile at this sample.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.heading)
    }
}

pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + p1 * 3.0 * mt2 * t + p2 * 3.0 * mt * t2 + p3 * t3
}

/// Evaluate the segment running from `from` to `to`.
pub fn evaluate_segment(from: &BezierPoint, to: &BezierPoint, t: f32) -> Vec3 {
    cubic_bezier(from.position, from.handle_out, to.handle_in, to.position, t)
}
