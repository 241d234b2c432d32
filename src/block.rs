// block.rs

use bevy::prelude::*;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

pub mod components;

use crate::config::FlaskConfig;
use crate::image::BlockTexture;
use crate::layout::Layout;
use crate::palette::BlockColor;
use crate::rules::BlockRecord;
use crate::session::Session;
use crate::BLOCK_Z;
use components::*;

pub fn plugin(app: &mut App) {
    app.register_type::<Block>()
        .register_type::<Held>()
        .observe(restart_game);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedBlock {
    pub container: usize,
    pub color: BlockColor,
    pub center: Vec2,
}

/// One block of every palette color per container, shuffled per container
/// and stacked upward from the container floor. Neighbours overlap by
/// `stack_overlap` so gravity settles them.
pub fn plan_stacks<R: Rng + ?Sized>(
    cfg: &FlaskConfig,
    layout: &Layout,
    rng: &mut R,
) -> Vec<PlannedBlock> {
    let pitch = cfg.block_size - cfg.stack_overlap;
    layout
        .containers
        .iter()
        .enumerate()
        .flat_map(|(container, geometry)| {
            let mut colors = cfg.palette.clone();
            colors.shuffle(&mut *rng);
            let x = geometry.back.center().x;
            let floor = geometry.bottom.max.y + cfg.block_size / 2.0;
            colors
                .into_iter()
                .enumerate()
                .map(move |(i, color)| PlannedBlock {
                    container,
                    color,
                    center: Vec2::new(x, floor + pitch * i as f32),
                })
        })
        .collect()
}

pub fn spawn_block(
    commands: &mut Commands,
    texture: &BlockTexture,
    size: f32,
    serial: u32,
    color: BlockColor,
    center: Vec2,
) -> Entity {
    commands
        .spawn(SpriteBundle {
            texture: texture.0.clone(),
            sprite: Sprite {
                color: color.tint(),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            transform: Transform::from_xyz(center.x, center.y, BLOCK_Z),
            ..default()
        })
        .insert(Name::new(format!("Block {serial} ({color:?})")))
        .insert(Block { color, serial })
        .insert(BlockPhysicsBundle::new(size))
        .id()
}

/// Spawn a full set of stacks. Serials start at zero.
pub fn spawn_stacks<R: Rng + ?Sized>(
    commands: &mut Commands,
    cfg: &FlaskConfig,
    layout: &Layout,
    texture: &BlockTexture,
    rng: &mut R,
) -> usize {
    let plan = plan_stacks(cfg, layout, rng);
    for (serial, planned) in plan.iter().enumerate() {
        spawn_block(
            commands,
            texture,
            cfg.block_size,
            serial as u32,
            planned.color,
            planned.center,
        );
    }
    plan.len()
}

pub fn spawn_blocks(
    mut commands: Commands,
    cfg: Res<FlaskConfig>,
    layout: Res<Layout>,
    texture: Res<BlockTexture>,
) {
    let count = spawn_stacks(
        &mut commands,
        &cfg,
        &layout,
        &texture,
        &mut rand::thread_rng(),
    );
    info!(
        "spawned {count} blocks in {} containers",
        layout.containers.len()
    );
}

/// Snapshot block entities for the rule layer, ordered by serial.
pub fn block_records<'a>(
    blocks: impl IntoIterator<Item = (Entity, &'a Block, &'a Transform)>,
) -> Vec<BlockRecord> {
    blocks
        .into_iter()
        .map(|(entity, block, transform)| BlockRecord {
            entity,
            serial: block.serial,
            color: block.color,
            center: transform.translation.truncate(),
        })
        .sorted_by_key(|r| r.serial)
        .collect()
}

#[derive(Event, Debug)]
pub struct RestartGame;

/// Throw away every block and the session, then deal fresh stacks.
pub fn restart_game(
    _trigger: Trigger<RestartGame>,
    mut commands: Commands,
    blocks: Query<Entity, With<Block>>,
    mut session: ResMut<Session>,
    cfg: Res<FlaskConfig>,
    layout: Res<Layout>,
    texture: Res<BlockTexture>,
) {
    info!("triggered: restart_game");
    blocks
        .iter()
        .for_each(|b| commands.entity(b).despawn_recursive());
    session.reset();
    spawn_stacks(
        &mut commands,
        &cfg,
        &layout,
        &texture,
        &mut rand::thread_rng(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn one_of_each_color_per_container() {
        let cfg = FlaskConfig::default();
        let layout = Layout::build(&cfg);
        let plan = plan_stacks(&cfg, &layout, &mut StdRng::seed_from_u64(7));
        assert_eq!(plan.len(), cfg.container_count() * cfg.stack_height());

        for (container, group) in &plan.iter().chunk_by(|p| p.container) {
            let colors: Vec<BlockColor> = group.map(|p| p.color).sorted().collect();
            assert_eq!(colors, BlockColor::ALL.to_vec(), "container {container}");
        }
    }

    #[test]
    fn stacks_rise_from_the_floor() {
        let cfg = FlaskConfig::default();
        let layout = Layout::build(&cfg);
        let plan = plan_stacks(&cfg, &layout, &mut StdRng::seed_from_u64(1));
        let center: Vec<&PlannedBlock> =
            plan.iter().filter(|p| p.container == 6).collect();

        assert_eq!(center[0].center, Vec2::new(600.0, 151.0));
        for pair in center.windows(2) {
            let gap = pair[1].center.y - pair[0].center.y;
            assert!(gap < cfg.block_size && gap > 0.0);
            assert_eq!(pair[1].center.x, 600.0);
        }
        let top = center.last().unwrap().center.y + cfg.block_size / 2.0;
        assert!(top < layout.containers[6].back.max.y);
    }
}
