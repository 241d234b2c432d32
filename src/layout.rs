//! Static board geometry. Built once from `FlaskConfig`; everything is in
//! world pixels with the origin at the bottom-left corner of the window.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::align::align;
use crate::config::FlaskConfig;

/// One flask: two walls and a bottom (physical), a back panel and an entry
/// marker (visual, used for containment and drop checks).
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ContainerGeometry {
    pub anchor: Vec2,
    pub left_wall: Rect,
    pub right_wall: Rect,
    pub bottom: Rect,
    pub back: Rect,
    pub entry: Rect,
}

impl ContainerGeometry {
    /// Walls and bottom, in that order.
    pub fn solids(&self) -> [Rect; 3] {
        [self.left_wall, self.right_wall, self.bottom]
    }
}

#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct Layout {
    pub containers: Vec<ContainerGeometry>,
    pub ground: Rect,
}

impl Layout {
    pub fn build(cfg: &FlaskConfig) -> Self {
        let a = |coord: f32| align(coord, cfg.grid_cell) as f32;
        let window = cfg.window_size();
        let cw = cfg.container_width();
        let ch = cfg.container_height();
        let half_cw = (cw / 2.0).floor();
        let half_ch = (ch / 2.0).floor();
        let entry_h = (ch / 10.0).floor();

        let containers = anchors(cfg)
            .into_iter()
            .map(|anchor @ Vec2 { x, y }| {
                let wall_size = Vec2::new(cfg.border, ch);
                ContainerGeometry {
                    anchor,
                    left_wall: Rect::from_center_size(
                        Vec2::new(a(x - half_cw), a(y)),
                        wall_size,
                    ),
                    right_wall: Rect::from_center_size(
                        Vec2::new(a(x + half_cw), a(y)),
                        wall_size,
                    ),
                    bottom: Rect::from_center_size(
                        Vec2::new(a(x), a(y - half_ch)),
                        Vec2::new(cw, cfg.border),
                    ),
                    back: Rect::from_center_size(
                        Vec2::new(a(x), a(y)),
                        Vec2::new(cw, ch),
                    ),
                    entry: Rect::from_center_size(
                        Vec2::new(a(x), y + ((ch - entry_h) / 2.0).floor()),
                        Vec2::new(cw, a(entry_h)),
                    ),
                }
            })
            .collect();

        let ground = Rect::from_center_size(
            Vec2::new(a(window.x / 2.0), a(0.0)),
            Vec2::new(window.x, cfg.block_size),
        );

        Layout { containers, ground }
    }

    /// Index of the first container whose back panel overlaps `square`.
    pub fn container_overlapping(&self, square: Rect) -> Option<usize> {
        self.containers
            .iter()
            .position(|c| !c.back.intersect(square).is_empty())
    }

    /// Index of the container whose entry marker contains `point`.
    pub fn entry_at(&self, point: Vec2) -> Option<usize> {
        self.containers.iter().position(|c| c.entry.contains(point))
    }
}

/// Container anchors: right of center, then left of center, then the center
/// itself.
pub fn anchors(cfg: &FlaskConfig) -> Vec<Vec2> {
    let window = cfg.window_size();
    let cx = (window.x / 2.0).floor();
    let cy = (window.y / 2.0).floor();
    let step = cfg.container_width() + cfg.gap;
    let n = cfg.containers_per_side;

    let right = (1..=n).map(|k| Vec2::new(cx + step * k as f32, cy));
    let left = (1..=n).map(|k| Vec2::new(cx - step * k as f32, cy));
    right
        .chain(left)
        .chain(std::iter::once(Vec2::new(cx, cy)))
        .collect()
}
