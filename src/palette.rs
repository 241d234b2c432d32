use bevy::prelude::*;

/// Block colors. Two blocks match iff their `BlockColor`s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum BlockColor {
    Red,
    DarkOrange,
    GoGreen,
    BrightNavyBlue,
    Purple,
    CerisePink,
}

impl BlockColor {
    pub const ALL: [BlockColor; 6] = [
        BlockColor::Red,
        BlockColor::DarkOrange,
        BlockColor::GoGreen,
        BlockColor::BrightNavyBlue,
        BlockColor::Purple,
        BlockColor::CerisePink,
    ];

    /// Sprite tint.
    pub fn tint(self) -> Color {
        match self {
            BlockColor::Red => Color::srgb_u8(255, 0, 0),
            BlockColor::DarkOrange => Color::srgb_u8(255, 140, 0),
            BlockColor::GoGreen => Color::srgb_u8(0, 171, 102),
            BlockColor::BrightNavyBlue => Color::srgb_u8(25, 116, 210),
            BlockColor::Purple => Color::srgb_u8(128, 0, 128),
            BlockColor::CerisePink => Color::srgb_u8(236, 59, 131),
        }
    }
}

pub const BACKGROUND_COLOR: Color = Color::srgb(1.0, 0.843, 0.0);
pub const CONTAINER_COLOR: Color = Color::srgb(0.933, 0.910, 0.667);
pub const BORDER_COLOR: Color = Color::BLACK;
pub const ENTRY_COLOR: Color = Color::srgb(0.184, 0.310, 0.310);
pub const GROUND_COLOR: Color = Color::srgb(0.392, 0.392, 0.392);
pub const TEXT_COLOR: Color = Color::WHITE;
