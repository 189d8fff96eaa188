//! # bevy_loft
//!
//! A Bevy plugin that sweeps a cross-section profile along a cubic Bézier
//! path, producing a render mesh and a trimesh collider.
//!
//! ## Features
//!
//! - Evenly spaced rings along the path (arc-length resampling)
//! - Profile yawed to follow the path in the horizontal plane
//! - UVs along the path by distance, selectable axis
//! - Position and heading lookups by normalized distance
//! - Rebuilds batched to at most one per frame via a dirty flag
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_loft::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(LoftPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn(
//!         Loft::new(
//!             straight_path(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]),
//!             vec![Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0)],
//!         )
//!         .with_segments(16),
//!     );
//! }
//! ```
//!
//! ## Using the core without Bevy's scheduler
//!
//! [`Loft::rebuild`] takes any [`MeshSink`](loft::MeshSink) and
//! [`ColliderSink`](loft::ColliderSink), so the sweep can feed other hosts.

pub mod loft;

pub use loft::LoftPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::loft::{
        straight_path, BezierPoint, ColliderSink, ColliderSlot, Loft, LoftError, LoftMesh,
        LoftPlugin, MeshSink, SamplePoint, TextureAxis,
    };
}
