//! # Components
//!
//! Every block entity carries `Block`. While it rests in the simulation it
//! also carries a `BlockPhysicsBundle`; picking it up swaps that bundle for
//! the `Held` marker, and dropping it swaps them back.
//!

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::palette::BlockColor;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Block {
    pub color: BlockColor,
    /// Creation order, see `rules::BlockRecord::serial`.
    pub serial: u32,
}

/// Nominal component for the block following the pointer.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct Held;

#[derive(Bundle)]
pub struct BlockPhysicsBundle {
    body: RigidBody,
    collider: Collider,
    locked: LockedAxes,
    velocity: Velocity,
    friction: Friction,
    restitution: Restitution,
    ccd: Ccd,
}

impl BlockPhysicsBundle {
    pub fn new(size: f32) -> Self {
        BlockPhysicsBundle {
            body: RigidBody::Dynamic,
            collider: Collider::cuboid(size / 2.0, size / 2.0),
            // keeps blocks axis aligned so square overlap tests hold
            locked: LockedAxes::ROTATION_LOCKED,
            velocity: Velocity::zero(),
            friction: Friction {
                coefficient: 0.3,
                combine_rule: CoefficientCombineRule::Min,
            },
            restitution: Restitution {
                coefficient: 0.0,
                combine_rule: CoefficientCombineRule::Min,
            },
            // enable continous collision detection
            ccd: Ccd::enabled(),
        }
    }
}
