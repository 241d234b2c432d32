//! Mouse handling: pick up, drag and drop blocks.
//!
//! `track_pointer` resolves the cursor into world space once per frame; the
//! other systems only read `PointerPosition`, so they can be driven without a
//! window.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::block::block_records;
use crate::block::components::{Block, BlockPhysicsBundle, Held};
use crate::config::FlaskConfig;
use crate::layout::Layout;
use crate::session::{DropVerdict, Session};
use crate::setup::MainCamera;
use crate::{GameSet, PausedState, BLOCK_Z, HELD_Z};

pub fn plugin(app: &mut App) {
    app.init_resource::<PointerPosition>().add_systems(
        Update,
        (
            track_pointer,
            (pick_up_block, drag_held_block, drop_held_block)
                .chain()
                .run_if(in_state(PausedState::Playing)),
        )
            .chain()
            .in_set(GameSet::Input),
    );
}

/// Cursor in world coordinates, `None` while it is outside the window.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerPosition(pub Option<Vec2>);

pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut pointer: ResMut<PointerPosition>,
) {
    let (Ok(window), Ok((camera, camera_transform))) =
        (windows.get_single(), cameras.get_single())
    else {
        return;
    };
    pointer.0 = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor));
}

pub fn pick_up_block(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerPosition>,
    mut session: ResMut<Session>,
    mut blocks: Query<(Entity, &Block, &mut Transform)>,
    layout: Res<Layout>,
    cfg: Res<FlaskConfig>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(point) = pointer.0 else {
        return;
    };

    let records = block_records(blocks.iter());
    let Some(picked) = session.press(point, &records, &layout, &cfg) else {
        debug!("nothing to pick up at {point}");
        return;
    };

    if let Ok((_, block, mut transform)) = blocks.get_mut(picked) {
        transform.translation.z = HELD_Z;
        info!("picked up {:?} block {}", block.color, block.serial);
    }
    commands
        .entity(picked)
        .remove::<BlockPhysicsBundle>()
        .insert(Held);
}

pub fn drag_held_block(
    pointer: Res<PointerPosition>,
    mut session: ResMut<Session>,
    mut held: Query<&mut Transform, With<Held>>,
) {
    let Some(point) = pointer.0 else {
        return;
    };
    let Some((entity, delta)) = session.drag(point) else {
        return;
    };
    if delta == Vec2::ZERO {
        return;
    }
    match held.get_mut(entity) {
        Ok(mut transform) => transform.translation += delta.extend(0.0),
        Err(_) => warn!("held block {entity:?} has no transform"),
    }
}

pub fn drop_held_block(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerPosition>,
    mut session: ResMut<Session>,
    mut blocks: Query<(Entity, &Block, &mut Transform)>,
    layout: Res<Layout>,
    cfg: Res<FlaskConfig>,
) {
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    // a release outside the window never lands on an entry marker
    let point = pointer.0.unwrap_or(Vec2::INFINITY);

    let records = block_records(blocks.iter());
    let Some(release) = session.release(point, &records, &layout, &cfg) else {
        return;
    };

    match release.verdict {
        DropVerdict::Accepted => info!("dropped block at {}", release.position),
        DropVerdict::Rejected(reason) => {
            info!("drop rejected ({reason:?}), reverting to {}", release.position)
        }
    }

    let Ok((entity, _, mut transform)) = blocks.get_mut(release.block) else {
        warn!("released block {:?} no longer exists", release.block);
        return;
    };
    transform.translation = release.position.extend(BLOCK_Z);
    commands
        .entity(entity)
        .remove::<Held>()
        .insert(BlockPhysicsBundle::new(cfg.block_size));
}
