//! Game constants, gathered in `FlaskConfig` so tests can shrink the board.

use bevy::prelude::*;

use crate::align::GRID_ALIGN_CELL;
use crate::palette::BlockColor;

/// width/height of single block
pub const BLOCK_SIZE: f32 = 100.0;
/// extra horizontal room inside a container
pub const CONTAINER_PADDING: f32 = 20.0;
pub const CONTAINER_BORDER: f32 = 2.0;
pub const CONTAINER_GAP: f32 = 0.0;
/// containers on each side of the center one
pub const CONTAINERS_PER_SIDE: usize = 3;
/// px/s², pointing down
pub const GRAVITY: f32 = 1000.0;
/// vertical overlap between freshly spawned neighbours in a stack
pub const STACK_OVERLAP: f32 = 4.0;
/// how far apart two block squares may be and still count as touching
pub const CONTACT_MARGIN: f32 = 1.5;

#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct FlaskConfig {
    pub block_size: f32,
    /// One block of each color goes into every container, so the stack
    /// height is the palette length.
    pub palette: Vec<BlockColor>,
    pub container_padding: f32,
    pub border: f32,
    pub gap: f32,
    pub containers_per_side: usize,
    pub grid_cell: f32,
    pub gravity: f32,
    pub stack_overlap: f32,
    pub contact_margin: f32,
}

impl Default for FlaskConfig {
    fn default() -> Self {
        FlaskConfig {
            block_size: BLOCK_SIZE,
            palette: BlockColor::ALL.to_vec(),
            container_padding: CONTAINER_PADDING,
            border: CONTAINER_BORDER,
            gap: CONTAINER_GAP,
            containers_per_side: CONTAINERS_PER_SIDE,
            grid_cell: GRID_ALIGN_CELL,
            gravity: GRAVITY,
            stack_overlap: STACK_OVERLAP,
            contact_margin: CONTACT_MARGIN,
        }
    }
}

impl FlaskConfig {
    pub fn stack_height(&self) -> usize {
        self.palette.len()
    }

    /// Drops that would leave a container holding more than this are
    /// rejected.
    pub fn capacity(&self) -> usize {
        self.stack_height() + 1
    }

    pub fn container_count(&self) -> usize {
        self.containers_per_side * 2 + 1
    }

    pub fn container_width(&self) -> f32 {
        self.block_size + self.container_padding
    }

    pub fn container_height(&self) -> f32 {
        self.block_size * (self.stack_height() + 2) as f32
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(
            self.container_width() * (self.containers_per_side * 2 + 4) as f32,
            self.container_height() + 2.0 * self.block_size,
        )
    }
}
