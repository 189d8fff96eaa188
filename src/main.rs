//! Example loft application: a banked ribbon that slowly changes shape.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_loft::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(LoftPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (sway_path, draw_path))
        .run();
}

fn setup(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(6.0, 14.0, 18.0).looking_at(Vec3::new(6.0, 0.0, 0.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Profile is swept with +X along the path, so the cross-section lies in Z/Y.
    let profile = vec![
        Vec3::new(0.0, 0.3, -1.5),
        Vec3::new(0.0, 0.0, -1.2),
        Vec3::new(0.0, 0.0, 1.2),
        Vec3::new(0.0, 0.3, 1.5),
    ];

    let path = vec![
        BezierPoint::from_offsets(0, Vec3::new(-2.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(2.0, 0.0, 2.0)),
        BezierPoint::from_offsets(1, Vec3::new(6.0, 1.0, 3.0), Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)),
        BezierPoint::from_offsets(2, Vec3::new(14.0, 0.0, -2.0), Vec3::new(-2.0, 0.0, 2.0), Vec3::ZERO),
    ];

    commands.spawn((
        Loft::new(path, profile).with_segments(48),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.6, 0.6, 0.65),
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        Visibility::default(),
    ));
}

fn sway_path(time: Res<Time>, mut lofts: Query<&mut Loft>) {
    let offset = time.elapsed_secs().sin() * 2.0;

    for mut loft in &mut lofts {
        let Some(middle) = loft.path.get_mut(1) else {
            continue;
        };
        let position = Vec3::new(6.0, 1.0, 3.0 + offset);
        middle.handle_in = position + Vec3::new(-2.0, 0.0, 0.0);
        middle.position = position;
        middle.handle_out = position + Vec3::new(2.0, 0.0, 0.0);
        loft.mark_dirty();
    }
}

fn draw_path(mut gizmos: Gizmos, lofts: Query<&Loft>) {
    for loft in &lofts {
        for point in &loft.path {
            gizmos.sphere(Isometry3d::from_translation(point.position), 0.15, Color::WHITE);
        }
        gizmos.sphere(
            Isometry3d::from_translation(loft.position_at_alpha(0.5)),
            0.25,
            Color::srgb(1.0, 0.4, 0.2),
        );
    }
}
