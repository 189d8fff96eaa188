//! Lookups against a built sample table.
//!
//! Alpha queries clamp to `0..=1` and return a zero sentinel (origin,
//! identity, zero heading) when the table is empty.

use bevy::prelude::*;

use super::arc_length::distances_coincide;
use super::types::{evaluate_segment, BezierPoint, SamplePoint};

fn target_distance(samples: &[SamplePoint], alpha: f32) -> f32 {
    let total = samples.last().map(|s| s.distance).unwrap_or(0.0);
    alpha.clamp(0.0, 1.0) * total
}

/// Interpolated position at `alpha` of the table's length.
pub fn position_at_alpha(samples: &[SamplePoint], alpha: f32) -> Vec3 {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Vec3::ZERO;
    };
    let target = target_distance(samples, alpha);

    let bracket = (1..samples.len())
        .find(|&p| samples[p - 1].distance <= target && target <= samples[p].distance);
    let Some(p) = bracket else {
        return if target <= first.distance {
            first.position
        } else {
            last.position
        };
    };

    let (a, b) = (&samples[p - 1], &samples[p]);
    if distances_coincide(a.distance, b.distance) {
        return a.position;
    }

    let t = (target - a.distance) / (b.distance - a.distance);
    if t >= 1.0 {
        b.position
    } else {
        a.position.lerp(b.position, t)
    }
}

/// Stored heading of the interior sample whose neighbours bracket `alpha`.
///
/// Headings are piecewise constant; nothing is interpolated. Tables without
/// an interior sample fall back to the nearest end.
pub fn heading_at_alpha(samples: &[SamplePoint], alpha: f32) -> f32 {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return 0.0;
    };
    let target = target_distance(samples, alpha);

    (1..samples.len().saturating_sub(1))
        .find(|&p| samples[p - 1].distance <= target && target <= samples[p + 1].distance)
        .map(|p| samples[p].heading)
        .unwrap_or(if target <= first.distance {
            first.heading
        } else {
            last.heading
        })
}

/// [`heading_at_alpha`] as a rotation about +Y.
pub fn rotation_at_alpha(samples: &[SamplePoint], alpha: f32) -> Quat {
    if samples.is_empty() {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(-heading_at_alpha(samples, alpha))
}

/// Evaluate the curve from control point `from` to `to` directly.
pub fn position_between(path: &[BezierPoint], from: usize, to: usize, t: f32) -> Option<Vec3> {
    Some(evaluate_segment(path.get(from)?, path.get(to)?, t))
}
