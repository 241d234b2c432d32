//! Same-color blocks in contact cancel out.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::block::block_records;
use crate::block::components::{Block, Held};
use crate::config::FlaskConfig;
use crate::rules::merge_pass;
use crate::session::Session;
use crate::{GameSet, PausedState};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        merge_touching_blocks
            .in_set(GameSet::Rules)
            .run_if(in_state(PausedState::Playing)),
    );
}

/// Run one merge pass over the resting blocks. Skipped while the pointer is
/// down so the block in hand is never merged away.
///
/// Neighbours come from a shape query with the block's square grown by
/// `contact_margin`, so stacked blocks resting on each other count as
/// touching.
pub fn merge_touching_blocks(
    mut commands: Commands,
    mut session: ResMut<Session>,
    rc: Res<RapierContext>,
    blocks: Query<(Entity, &Block, &Transform), Without<Held>>,
    cfg: Res<FlaskConfig>,
) {
    if session.pointer_down {
        return;
    }

    let records = block_records(blocks.iter());
    let half = cfg.block_size / 2.0 + cfg.contact_margin;
    let probe = Collider::cuboid(half, half);

    let outcome = merge_pass(&records, |block| {
        let mut hits = Vec::new();
        rc.intersections_with_shape(
            block.center,
            0.0,
            &probe,
            QueryFilter::only_dynamic().exclude_collider(block.entity),
            |entity| {
                hits.push(entity);
                true
            },
        );
        hits
    });

    if outcome.pairs == 0 {
        return;
    }
    outcome
        .removed
        .iter()
        .for_each(|&e| commands.entity(e).despawn_recursive());
    session.score += outcome.pairs;
    info!(
        "merged {} pair(s), score {}",
        outcome.pairs, session.score
    );
}
