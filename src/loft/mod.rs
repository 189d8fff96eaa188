mod arc_length;
mod components;
mod error;
mod mesh_gen;
mod query;
mod types;

pub use arc_length::*;
pub use components::*;
pub use error::*;
pub use mesh_gen::*;
pub use query::*;
pub use types::*;

use bevy::prelude::*;

/// Plugin that rebuilds dirty [`Loft`] meshes and colliders once per frame.
///
/// Mutate a loft in `Update`, call [`Loft::mark_dirty`], and the rebuild runs
/// in `PostUpdate`. Any number of edits within a frame cost one rebuild.
pub struct LoftPlugin;

impl Plugin for LoftPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Loft>()
            .register_type::<BezierPoint>()
            .register_type::<SamplePoint>()
            .register_type::<TextureAxis>()
            .add_systems(PostUpdate, mesh_gen::rebuild_dirty_lofts);
    }
}
