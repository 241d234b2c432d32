//! # Block texture
//!
//! Blocks share one in-memory texture: an opaque white square with a dark
//! outline. Each sprite tints it with its `BlockColor`, so the white body
//! takes the block color while the outline stays dark.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use image::{DynamicImage, ImageBuffer, RgbaImage};

use crate::config::FlaskConfig;

/// Outline thickness in texture pixels.
const OUTLINE: u32 = 3;

#[derive(Resource, Debug, Clone, Default)]
pub struct BlockTexture(pub Handle<Image>);

/// Generate an `extent` x `extent` white square outlined in near-black.
pub fn block_square(extent: u32) -> RgbaImage {
    let mut image = ImageBuffer::new(extent, extent);
    let last = extent.saturating_sub(1);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let on_outline = x < OUTLINE
            || y < OUTLINE
            || x + OUTLINE > last
            || y + OUTLINE > last;
        *pixel = if on_outline {
            image::Rgba::<u8>([20, 20, 20, 255])
        } else {
            image::Rgba::<u8>([255, 255, 255, 255])
        };
    }
    image
}

pub fn load_block_texture(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    cfg: Res<FlaskConfig>,
) {
    let square = block_square(cfg.block_size as u32);
    let handle = images.add(Image::from_dynamic(
        DynamicImage::from(square),
        true,
        RenderAssetUsages::RENDER_WORLD,
    ));
    info!("generated block texture ({} px)", cfg.block_size);
    commands.insert_resource(BlockTexture(handle));
}
