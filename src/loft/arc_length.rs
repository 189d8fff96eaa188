//! Distance tables for lofting.
//!
//! A loft path is resampled in two passes. The control points first get a
//! cheap distance estimate from the straight chords between them, which is
//! only used to pick the segment and local parameter for each evenly spaced
//! target distance. The sampled curve positions then get their own chordal
//! distance table, which everything downstream (UVs, path queries) reads.

use bevy::prelude::*;

use super::types::{evaluate_segment, BezierPoint, SamplePoint};

/// Relative tolerance for comparing two distances along a path.
const DISTANCE_TOLERANCE: f32 = 1e-5;

/// Whether two distances are equal within [`DISTANCE_TOLERANCE`], scaled by
/// their magnitude so small geometry keeps its resolution.
pub fn distances_coincide(a: f32, b: f32) -> bool {
    (a - b).abs() <= DISTANCE_TOLERANCE * a.abs().max(b.abs())
}

/// Store the chord-length estimate of each control point's distance from the
/// path start and return the estimated total length.
///
/// Handles are ignored, so strongly bowed segments are under-estimated.
pub fn estimate_path_distances(path: &mut [BezierPoint]) -> f32 {
    let Some(first) = path.first_mut() else {
        return 0.0;
    };
    first.distance = 0.0;

    for i in 1..path.len() {
        let chord = path[i].position.distance(path[i - 1].position);
        path[i].distance = path[i - 1].distance + chord;
    }

    path.last().map(|p| p.distance).unwrap_or(0.0)
}

/// Find the segment whose estimated distances bracket `target`.
///
/// Returns the index of the segment's end point and the local parameter.
/// Both bounds are inclusive; the first matching segment wins so a target
/// sitting exactly on a control point produces one sample, not two. Targets
/// outside every bracket clamp to the first or last segment.
///
/// `path` must hold at least two points.
pub fn locate_segment(path: &[BezierPoint], target: f32) -> (usize, f32) {
    let last = path.len() - 1;

    let index = (1..path.len())
        .find(|&i| {
            let start = path[i - 1].distance;
            let end = path[i].distance;
            (start <= target || distances_coincide(start, target))
                && (end >= target || distances_coincide(end, target))
        })
        .unwrap_or(if target <= path[0].distance { 1 } else { last });

    let start = path[index - 1].distance;
    let end = path[index].distance;
    let t = if !distances_coincide(start, end) {
        ((target - start) / (end - start)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    (index, t)
}

/// Sample `segments` points at evenly spaced estimated distances.
///
/// Control point distances must already be estimated. Returns an empty table
/// for fewer than two points or segments.
pub fn resample_uniform(path: &[BezierPoint], segments: usize) -> Vec<SamplePoint> {
    if path.len() < 2 || segments < 2 {
        return Vec::new();
    }

    let total = path[path.len() - 1].distance;
    let step = total / (segments - 1) as f32;
    let mut samples: Vec<SamplePoint> = Vec::with_capacity(segments);

    for ring in 0..segments {
        let target = step * ring as f32;
        let (index, t) = locate_segment(path, target);
        let position = evaluate_segment(&path[index - 1], &path[index], t);

        let distance = samples
            .last()
            .map(|prev| prev.distance + prev.position.distance(position))
            .unwrap_or(0.0);

        samples.push(SamplePoint {
            ring,
            distance,
            position,
            heading: 0.0,
        });
    }

    samples
}

/// Set each interior sample's heading from its neighbours, in the XZ plane.
///
/// The first and last samples keep a heading of zero.
pub fn assign_headings(samples: &mut [SamplePoint]) {
    let count = samples.len();

    for i in 0..count {
        samples[i].heading = if i > 0 && i + 1 < count {
            let delta = samples[i + 1].position - samples[i - 1].position;
            delta.z.atan2(delta.x)
        } else {
            0.0
        };
    }
}

/// Run the full pipeline: estimate, resample, then assign headings.
pub fn build_sample_table(path: &mut [BezierPoint], segments: usize) -> Vec<SamplePoint> {
    estimate_path_distances(path);
    let mut samples = resample_uniform(path, segments);
    assign_headings(&mut samples);
    samples
}

/// Total chordal length of a sample table.
pub fn table_length(samples: &[SamplePoint]) -> f32 {
    samples.last().map(|s| s.distance).unwrap_or(0.0)
}

/// Straight-handled path through the given positions, handles on the chord.
pub fn straight_path(positions: &[Vec3]) -> Vec<BezierPoint> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            let prev = if i > 0 { positions[i - 1] } else { position };
            let next = positions.get(i + 1).copied().unwrap_or(position);
            BezierPoint::new(
                i,
                position.lerp(prev, 1.0 / 3.0),
                position,
                position.lerp(next, 1.0 / 3.0),
            )
        })
        .collect()
}
