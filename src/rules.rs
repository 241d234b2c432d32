//! Game rules over plain block records.
//!
//! Nothing here knows about sprites or rigid bodies: the ECS side snapshots
//! blocks into `BlockRecord`s (see `block::block_records`) and applies what
//! comes back.

use bevy::math::Rect;
use bevy::prelude::*;
use bevy::utils::HashSet;
use itertools::Itertools;

use crate::layout::Layout;
use crate::palette::BlockColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRecord {
    pub entity: Entity,
    /// Creation order. All passes visit blocks by ascending serial.
    pub serial: u32,
    pub color: BlockColor,
    pub center: Vec2,
}

impl BlockRecord {
    pub fn square(&self, size: f32) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(size))
    }
}

/// Horizontal span of the column a block sits in.
pub fn column_span(x: f32, size: f32) -> (f32, f32) {
    (x - size / 2.0, x + size / 2.0)
}

fn in_column(block: &BlockRecord, x: f32, size: f32) -> bool {
    let (lo, hi) = column_span(x, size);
    lo <= block.center.x && block.center.x <= hi
}

/// Last block (by serial) whose square contains `point`.
pub fn block_at_point(
    point: Vec2,
    blocks: &[BlockRecord],
    size: f32,
) -> Option<&BlockRecord> {
    blocks
        .iter()
        .filter(|b| b.square(size).contains(point))
        .max_by_key(|b| b.serial)
}

/// Whether `block` is inside a container and is the highest block of its
/// column, within half a block.
pub fn is_topmost(
    block: &BlockRecord,
    blocks: &[BlockRecord],
    layout: &Layout,
    size: f32,
) -> bool {
    if layout.container_overlapping(block.square(size)).is_none() {
        return false;
    }

    let Some(top) = blocks
        .iter()
        .filter(|b| in_column(b, block.center.x, size))
        .map(|b| b.center.y)
        .max_by(f32::total_cmp)
    else {
        // nothing stands in this column, not even `block`
        return false;
    };

    top - size / 2.0 <= block.center.y && block.center.y <= top + size / 2.0
}

/// Number of blocks in the column of `block`, itself included. `None` when
/// the block is not inside any container.
pub fn container_occupancy(
    block: &BlockRecord,
    blocks: &[BlockRecord],
    layout: &Layout,
    size: f32,
) -> Option<usize> {
    layout.container_overlapping(block.square(size))?;
    Some(
        blocks
            .iter()
            .filter(|b| in_column(b, block.center.x, size))
            .count(),
    )
}

/// Number of blocks standing in container `index` once `held` is dropped
/// there: every block whose center lies within the back panel's horizontal
/// span, plus `held` counted exactly once wherever it currently is.
pub fn occupants_of(
    index: usize,
    held: &BlockRecord,
    blocks: &[BlockRecord],
    layout: &Layout,
) -> Option<usize> {
    let back = layout.containers.get(index)?.back;
    let standing = blocks
        .iter()
        .filter(|b| b.entity != held.entity)
        .filter(|b| back.min.x <= b.center.x && b.center.x <= back.max.x)
        .count();
    Some(standing + 1)
}

/// Whether the squares of `a` and `b` overlap or are at most `margin` apart
/// on both axes.
pub fn touching(a: &BlockRecord, b: &BlockRecord, size: f32, margin: f32) -> bool {
    let d = (a.center - b.center).abs();
    d.x <= size + margin && d.y <= size + margin
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Removed blocks, in the order they were matched.
    pub removed: Vec<Entity>,
    pub pairs: u32,
}

/// One merge pass.
///
/// Each surviving block is compared against the touching neighbour with the
/// greatest serial only; a color match removes both. Blocks removed earlier
/// in the pass are neither visited nor considered as neighbours. `touching`
/// may report entities that are not in `blocks`; they are ignored.
pub fn merge_pass<F>(blocks: &[BlockRecord], mut touching: F) -> MergeOutcome
where
    F: FnMut(&BlockRecord) -> Vec<Entity>,
{
    let mut removed: HashSet<Entity> = HashSet::default();
    let mut outcome = MergeOutcome::default();

    for block in blocks.iter().sorted_by_key(|b| b.serial) {
        if removed.contains(&block.entity) {
            continue;
        }
        let neighbours = touching(block);
        let Some(last) = blocks
            .iter()
            .filter(|b| b.entity != block.entity && !removed.contains(&b.entity))
            .filter(|b| neighbours.contains(&b.entity))
            .max_by_key(|b| b.serial)
        else {
            continue;
        };
        if last.color == block.color {
            removed.insert(block.entity);
            removed.insert(last.entity);
            outcome.removed.push(block.entity);
            outcome.removed.push(last.entity);
            outcome.pairs += 1;
        }
    }
    outcome
}

/// `merge_pass` using the geometric `touching` test.
pub fn merge_touching(
    blocks: &[BlockRecord],
    size: f32,
    margin: f32,
) -> MergeOutcome {
    merge_pass(blocks, |block| {
        blocks
            .iter()
            .filter(|b| b.entity != block.entity && touching(block, b, size, margin))
            .map(|b| b.entity)
            .collect()
    })
}

/// Won when no two remaining blocks share a color.
pub fn has_won(blocks: &[BlockRecord]) -> bool {
    blocks.iter().map(|b| b.color).unique().count() == blocks.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlaskConfig;
    use crate::palette::BlockColor::*;

    fn rec(serial: u32, color: BlockColor, x: f32, y: f32) -> BlockRecord {
        BlockRecord {
            entity: Entity::from_raw(serial),
            serial,
            color,
            center: Vec2::new(x, y),
        }
    }

    fn layout() -> Layout {
        Layout::build(&FlaskConfig::default())
    }

    // center container spans x 540..660, floor at y 100
    fn column(colors: &[BlockColor]) -> Vec<BlockRecord> {
        colors
            .iter()
            .enumerate()
            .map(|(i, &c)| rec(i as u32, c, 600.0, 151.0 + 100.0 * i as f32))
            .collect()
    }

    #[test]
    fn topmost_of_a_column() {
        let blocks = column(&[Red, DarkOrange, GoGreen]);
        let layout = layout();
        assert!(is_topmost(&blocks[2], &blocks, &layout, 100.0));
        assert!(!is_topmost(&blocks[1], &blocks, &layout, 100.0));
        assert!(!is_topmost(&blocks[0], &blocks, &layout, 100.0));
    }

    #[test]
    fn topmost_requires_a_container() {
        let lone = rec(0, Red, 40.0, 200.0);
        assert!(!is_topmost(&lone, &[lone], &layout(), 100.0));
    }

    #[test]
    fn occupancy_counts_the_column() {
        let mut blocks = column(&[Red, DarkOrange, GoGreen]);
        // neighbour container, not counted
        blocks.push(rec(3, Purple, 720.0, 151.0));
        let layout = layout();
        assert_eq!(container_occupancy(&blocks[0], &blocks, &layout, 100.0), Some(3));
        assert_eq!(container_occupancy(&blocks[3], &blocks, &layout, 100.0), Some(1));

        let outside = rec(9, Red, 40.0, 200.0);
        assert_eq!(container_occupancy(&outside, &blocks, &layout, 100.0), None);
    }

    #[test]
    fn topmost_of_an_empty_column_is_false() {
        let layout = layout();
        let stray = rec(9, Red, 600.0, 151.0);
        assert!(!is_topmost(&stray, &[], &layout, 100.0));
        // only the neighbouring container at x = 720 is occupied
        let elsewhere = [rec(0, GoGreen, 720.0, 151.0)];
        assert!(!is_topmost(&stray, &elsewhere, &layout, 100.0));
    }

    #[test]
    fn occupants_count_the_back_span_and_the_held_block_once() {
        let layout = layout();
        let blocks = column(&[Red, GoGreen, Purple]);
        let index = layout.entry_at(Vec2::new(600.0, 880.0)).unwrap();

        // held from elsewhere, far off the column
        let held = rec(7, Red, 450.0, 880.0);
        assert_eq!(occupants_of(index, &held, &blocks, &layout), Some(4));
        // held already in the column is not counted twice
        assert_eq!(occupants_of(index, &blocks[2], &blocks, &layout), Some(3));
        assert_eq!(occupants_of(99, &held, &blocks, &layout), None);
    }

    #[test]
    fn block_at_point_prefers_latest() {
        let a = rec(0, Red, 100.0, 100.0);
        let b = rec(1, Purple, 130.0, 100.0);
        let blocks = [b, a];
        assert_eq!(block_at_point(Vec2::new(120.0, 100.0), &blocks, 100.0), Some(&b));
        assert_eq!(block_at_point(Vec2::new(60.0, 100.0), &blocks, 100.0), Some(&a));
        assert_eq!(block_at_point(Vec2::new(600.0, 600.0), &blocks, 100.0), None);
    }

    #[test]
    fn touching_allows_margin() {
        let a = rec(0, Red, 0.0, 0.0);
        assert!(touching(&a, &rec(1, Red, 0.0, 101.0), 100.0, 1.5));
        assert!(!touching(&a, &rec(1, Red, 0.0, 102.0), 100.0, 1.5));
        assert!(touching(&a, &rec(1, Red, 60.0, 60.0), 100.0, 0.0));
    }

    #[test]
    fn same_color_pair_merges() {
        let blocks = vec![
            rec(0, Red, 600.0, 151.0),
            rec(1, Red, 600.0, 251.0),
            rec(2, Purple, 840.0, 151.0),
        ];
        let out = merge_touching(&blocks, 100.0, 1.5);
        assert_eq!(out.pairs, 1);
        assert_eq!(out.removed, vec![blocks[0].entity, blocks[1].entity]);
    }

    #[test]
    fn different_colors_do_not_merge() {
        let blocks = column(&[Red, DarkOrange, GoGreen]);
        assert_eq!(merge_touching(&blocks, 100.0, 1.5), MergeOutcome::default());
    }

    #[test]
    fn only_last_neighbour_is_compared() {
        // middle block touches both; the later (purple) one decides
        let blocks = column(&[Red, Red, Purple]);
        let out = merge_pass(&blocks, |b| match b.serial {
            0 => vec![blocks[1].entity],
            1 => vec![blocks[0].entity, blocks[2].entity],
            _ => vec![blocks[1].entity],
        });
        // block 0 sees only block 1, so the reds still merge on the first visit
        assert_eq!(out.pairs, 1);

        let out = merge_pass(&blocks, |b| match b.serial {
            0 => vec![],
            1 => vec![blocks[0].entity, blocks[2].entity],
            _ => vec![blocks[1].entity],
        });
        assert_eq!(out.pairs, 0);
    }

    #[test]
    fn removed_blocks_are_skipped() {
        // a red run of three: one pair, the third survives
        let blocks = column(&[Red, Red, Red]);
        let out = merge_touching(&blocks, 100.0, 1.5);
        assert_eq!(out.pairs, 1);
        assert_eq!(out.removed.len(), 2);
        assert!(!out.removed.contains(&blocks[2].entity));
    }

    #[test]
    fn unknown_neighbours_are_ignored() {
        let blocks = column(&[Red]);
        let out = merge_pass(&blocks, |_| vec![Entity::from_raw(999)]);
        assert_eq!(out, MergeOutcome::default());
    }

    #[test]
    fn win_needs_unique_colors() {
        let distinct = column(&BlockColor::ALL);
        assert!(has_won(&distinct));

        let mut shared = distinct.clone();
        shared[5].color = Red;
        assert_eq!(shared.len(), 6);
        assert!(!has_won(&shared));

        assert!(has_won(&[]));
    }
}
