//! Session context: score, pointer state and the pick-up/drag/drop state
//! machine.
//!
//! ```text
//! Idle --press on a topmost block--> Holding --drag--> Holding
//!   ^                                   |
//!   +-------------- release ------------+  (accepted or reverted)
//! ```
//!
//! `Session` only decides. Moving transforms and adding/removing physics
//! bodies is done by the systems in `crate::pointer`.

use bevy::prelude::*;

use crate::config::FlaskConfig;
use crate::layout::Layout;
use crate::rules::{block_at_point, is_topmost, occupants_of, BlockRecord};

#[derive(Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub enum Grip {
    #[default]
    Idle,
    Holding {
        block: Entity,
        /// Where the block goes back to if the drop is rejected.
        revert: Vec2,
        last_pointer: Vec2,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Released away from every entry marker.
    OutsideEntry,
    /// The destination container would hold more than the capacity.
    ContainerFull { occupants: usize },
    /// The held block was despawned before it was let go.
    Vanished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropVerdict {
    Accepted,
    Rejected(RejectReason),
}

/// Result of releasing a held block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub block: Entity,
    pub verdict: DropVerdict,
    /// Where the block should be put back into the simulation.
    pub position: Vec2,
}

#[derive(Resource, Debug, Default, Clone, Reflect)]
#[reflect(Resource)]
pub struct Session {
    pub score: u32,
    pub pointer_down: bool,
    grip: Grip,
}

impl Session {
    pub fn grip(&self) -> Grip {
        self.grip
    }

    pub fn held(&self) -> Option<Entity> {
        match self.grip {
            Grip::Holding { block, .. } => Some(block),
            Grip::Idle => None,
        }
    }

    /// Pointer went down at `point`. Returns the block that was picked up.
    pub fn press(
        &mut self,
        point: Vec2,
        blocks: &[BlockRecord],
        layout: &Layout,
        cfg: &FlaskConfig,
    ) -> Option<Entity> {
        self.pointer_down = true;
        if self.held().is_some() {
            return None;
        }

        let block = block_at_point(point, blocks, cfg.block_size)?;
        if !is_topmost(block, blocks, layout, cfg.block_size) {
            return None;
        }

        self.grip = Grip::Holding {
            block: block.entity,
            revert: block.center,
            last_pointer: point,
        };
        Some(block.entity)
    }

    /// Pointer moved to `point`. Returns the held block and how far it
    /// should move.
    pub fn drag(&mut self, point: Vec2) -> Option<(Entity, Vec2)> {
        let Grip::Holding {
            block,
            last_pointer,
            ..
        } = &mut self.grip
        else {
            return None;
        };
        let delta = point - *last_pointer;
        *last_pointer = point;
        Some((*block, delta))
    }

    /// Pointer went up at `point`. `blocks` must contain the held block at
    /// its dragged position.
    pub fn release(
        &mut self,
        point: Vec2,
        blocks: &[BlockRecord],
        layout: &Layout,
        cfg: &FlaskConfig,
    ) -> Option<Release> {
        self.pointer_down = false;
        let Grip::Holding { block, revert, .. } = std::mem::take(&mut self.grip)
        else {
            return None;
        };

        let Some(held) = blocks.iter().find(|b| b.entity == block) else {
            warn!("released block {block:?} is gone, reverting");
            return Some(Release {
                block,
                verdict: DropVerdict::Rejected(RejectReason::Vanished),
                position: revert,
            });
        };

        let verdict = drop_verdict(point, held, blocks, layout, cfg);
        let position = match verdict {
            DropVerdict::Accepted => held.center,
            DropVerdict::Rejected(_) => revert,
        };
        Some(Release {
            block,
            verdict,
            position,
        })
    }

    /// Forget the held block and pointer state, keep nothing.
    pub fn reset(&mut self) {
        *self = Session::default();
    }
}

/// Whether `held` may stay where the pointer let go of it.
pub fn drop_verdict(
    point: Vec2,
    held: &BlockRecord,
    blocks: &[BlockRecord],
    layout: &Layout,
    cfg: &FlaskConfig,
) -> DropVerdict {
    let Some(index) = layout.entry_at(point) else {
        return DropVerdict::Rejected(RejectReason::OutsideEntry);
    };
    let occupants = occupants_of(index, held, blocks, layout).unwrap_or(1);
    if occupants > cfg.capacity() {
        return DropVerdict::Rejected(RejectReason::ContainerFull { occupants });
    }
    DropVerdict::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BlockColor::{self, *};

    fn rec(serial: u32, color: BlockColor, x: f32, y: f32) -> BlockRecord {
        BlockRecord {
            entity: Entity::from_raw(serial),
            serial,
            color,
            center: Vec2::new(x, y),
        }
    }

    fn board() -> (FlaskConfig, Layout) {
        let cfg = FlaskConfig::default();
        let layout = Layout::build(&cfg);
        (cfg, layout)
    }

    #[test]
    fn press_on_nothing_stays_idle() {
        let (cfg, layout) = board();
        let mut session = Session::default();
        assert_eq!(session.press(Vec2::new(10.0, 10.0), &[], &layout, &cfg), None);
        assert_eq!(session.grip(), Grip::Idle);
        assert!(session.pointer_down);
    }

    #[test]
    fn press_below_the_top_stays_idle() {
        let (cfg, layout) = board();
        let blocks = [rec(0, Red, 600.0, 151.0), rec(1, Purple, 600.0, 251.0)];
        let mut session = Session::default();
        assert_eq!(session.press(Vec2::new(600.0, 151.0), &blocks, &layout, &cfg), None);
        assert_eq!(session.held(), None);
    }

    #[test]
    fn press_drag_release_accepted() {
        let (cfg, layout) = board();
        let mut blocks = vec![rec(0, Red, 600.0, 151.0), rec(1, Purple, 600.0, 251.0)];
        let mut session = Session::default();

        let picked = session.press(Vec2::new(605.0, 255.0), &blocks, &layout, &cfg);
        assert_eq!(picked, Some(blocks[1].entity));

        // over the entry marker of the container at x = 720
        let (block, delta) = session.drag(Vec2::new(725.0, 875.0)).unwrap();
        assert_eq!(block, blocks[1].entity);
        assert_eq!(delta, Vec2::new(120.0, 620.0));
        blocks[1].center += delta;

        let release = session
            .release(Vec2::new(725.0, 875.0), &blocks, &layout, &cfg)
            .unwrap();
        assert_eq!(release.verdict, DropVerdict::Accepted);
        assert_eq!(release.position, Vec2::new(720.0, 871.0));
        assert_eq!(session.grip(), Grip::Idle);
        assert!(!session.pointer_down);
    }

    #[test]
    fn release_outside_entry_reverts() {
        let (cfg, layout) = board();
        let mut blocks = vec![rec(0, Red, 600.0, 151.0)];
        let mut session = Session::default();
        session.press(Vec2::new(600.0, 151.0), &blocks, &layout, &cfg);

        let (_, delta) = session.drag(Vec2::new(300.0, 500.0)).unwrap();
        blocks[0].center += delta;
        let release = session
            .release(Vec2::new(300.0, 500.0), &blocks, &layout, &cfg)
            .unwrap();
        assert_eq!(
            release.verdict,
            DropVerdict::Rejected(RejectReason::OutsideEntry)
        );
        assert_eq!(release.position, Vec2::new(600.0, 151.0));
    }

    #[test]
    fn release_without_hold_is_noop() {
        let (cfg, layout) = board();
        let mut session = Session {
            pointer_down: true,
            ..default()
        };
        assert_eq!(session.release(Vec2::ZERO, &[], &layout, &cfg), None);
        assert!(!session.pointer_down);
    }

    #[test]
    fn drag_while_idle_is_none() {
        let mut session = Session::default();
        assert_eq!(session.drag(Vec2::ONE), None);
    }

    #[test]
    fn release_of_a_vanished_block_reverts() {
        let (cfg, layout) = board();
        let blocks = [rec(0, Red, 600.0, 151.0)];
        let mut session = Session::default();
        session.press(Vec2::new(600.0, 151.0), &blocks, &layout, &cfg);

        let release = session
            .release(Vec2::new(720.0, 860.0), &[], &layout, &cfg)
            .unwrap();
        assert_eq!(release.block, blocks[0].entity);
        assert_eq!(release.verdict, DropVerdict::Rejected(RejectReason::Vanished));
        assert_eq!(release.position, Vec2::new(600.0, 151.0));
        assert_eq!(session.grip(), Grip::Idle);
    }

    #[test]
    fn occupancy_follows_the_entry_not_the_held_block() {
        let (cfg, layout) = board();
        // container at x = 720 is full, its neighbour at x = 840 is empty
        let mut blocks: Vec<BlockRecord> = (0..7)
            .map(|i| rec(i, BlockColor::ALL[i as usize % 6], 720.0, 151.0 + 100.0 * i as f32))
            .collect();

        // grabbed by its edge: pointer over x = 720, block center over x = 840
        let held = rec(7, Red, 830.0, 860.0);
        blocks.push(held);
        let verdict = drop_verdict(Vec2::new(730.0, 860.0), &held, &blocks, &layout, &cfg);
        assert_eq!(
            verdict,
            DropVerdict::Rejected(RejectReason::ContainerFull { occupants: 8 })
        );

        // the other way round, the empty container takes it
        let held = rec(7, Red, 720.0, 860.0);
        *blocks.last_mut().unwrap() = held;
        let verdict = drop_verdict(Vec2::new(835.0, 860.0), &held, &blocks, &layout, &cfg);
        assert_eq!(verdict, DropVerdict::Accepted);
    }

    #[test]
    fn full_container_rejects() {
        let (cfg, layout) = board();
        // seven occupants in the container at x = 720, plus the held block
        let mut blocks: Vec<BlockRecord> = (0..7)
            .map(|i| rec(i, BlockColor::ALL[i as usize % 6], 720.0, 151.0 + 100.0 * i as f32))
            .collect();
        let held = rec(7, Red, 700.0, 860.0);
        blocks.push(held);
        let verdict = drop_verdict(Vec2::new(700.0, 860.0), &held, &blocks, &layout, &cfg);
        assert_eq!(
            verdict,
            DropVerdict::Rejected(RejectReason::ContainerFull { occupants: 8 })
        );

        // one fewer occupant fits
        blocks.remove(6);
        let verdict = drop_verdict(Vec2::new(700.0, 860.0), &held, &blocks, &layout, &cfg);
        assert_eq!(verdict, DropVerdict::Accepted);
    }
}
