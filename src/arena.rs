// arena.rs

use bevy::math::Rect;
use bevy::prelude::*;
use bevy_prototype_lyon::{
    draw::Fill, entity::ShapeBundle, geometry::GeometryBuilder, shapes,
};
use bevy_rapier2d::prelude::*;

use crate::layout::Layout;
use crate::palette::{
    BACKGROUND_COLOR, BORDER_COLOR, CONTAINER_COLOR, ENTRY_COLOR, GROUND_COLOR,
};
use crate::{BACK_Z, ENTRY_Z, GROUND_Z, WALL_Z};

#[derive(Component, Debug)]
pub struct Ground;

#[derive(Component, Debug)]
pub enum Wall {
    Left,
    Right,
    Bottom,
}

/// Visual panel behind the nth container. Blocks overlapping it count as
/// inside that container.
#[derive(Component, Debug)]
pub struct ContainerBack(pub usize);

/// Drop zone at the top of the nth container.
#[derive(Component, Debug)]
pub struct EntryMarker(pub usize);

pub fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(BACKGROUND_COLOR));
}

/// Filled rectangle covering `rect`, drawn on layer `z`.
fn filled_rect(rect: Rect, color: Color, z: f32) -> (ShapeBundle, Fill) {
    let shape = shapes::Rectangle {
        extents: rect.size(),
        ..Default::default()
    };
    let center = rect.center();
    (
        ShapeBundle {
            path: GeometryBuilder::build_as(&shape),
            spatial: SpatialBundle::from_transform(Transform::from_xyz(
                center.x, center.y, z,
            )),
            ..default()
        },
        Fill::color(color),
    )
}

pub fn spawn_arena(mut commands: Commands, layout: Res<Layout>) {
    for (i, container) in layout.containers.iter().enumerate() {
        commands
            .spawn(filled_rect(container.back, CONTAINER_COLOR, BACK_Z))
            .insert(Name::new(format!("Container {i} back")))
            .insert(ContainerBack(i));

        commands
            .spawn(filled_rect(container.entry, ENTRY_COLOR, ENTRY_Z))
            .insert(Name::new(format!("Container {i} entry")))
            .insert(EntryMarker(i));

        let walls = [Wall::Left, Wall::Right, Wall::Bottom];
        for (wall, rect) in walls.into_iter().zip(container.solids()) {
            commands
                .spawn(filled_rect(rect, BORDER_COLOR, WALL_Z))
                .insert(Name::new(format!("Container {i} {wall:?}")))
                .insert(StaticBodyBundle::new(rect))
                .insert(wall);
        }
    }

    /* Create the ground. */
    commands
        .spawn(filled_rect(layout.ground, GROUND_COLOR, GROUND_Z))
        .insert(Name::new("Ground"))
        .insert(StaticBodyBundle::new(layout.ground))
        .insert(Ground);

    info!("spawned arena: {} containers", layout.containers.len());
}

#[derive(Bundle)]
pub struct StaticBodyBundle {
    body: RigidBody,
    collider: Collider,
    friction: Friction,
    restitution: Restitution,
}

impl StaticBodyBundle {
    pub fn new(rect: Rect) -> Self {
        let half = rect.half_size();
        StaticBodyBundle {
            body: RigidBody::Fixed,
            collider: Collider::cuboid(half.x, half.y),
            restitution: Restitution::coefficient(0.0),
            friction: Friction {
                coefficient: 0.3,
                combine_rule: CoefficientCombineRule::Min,
            },
        }
    }
}
