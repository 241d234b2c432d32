//! Provides app states, system sets and the game modules.
//!
//! The rule layer (`align`, `layout`, `rules`, `session`) is plain data and
//! does not touch the ECS world; the remaining modules are bevy plugins that
//! feed it from components and apply its verdicts.
//!

use bevy::prelude::*;

pub mod align;
pub mod arena;
pub mod block;
pub mod config;
pub mod debug;
pub mod hud;
pub mod image;
pub mod kbd;
pub mod layout;
pub mod merge;
pub mod palette;
pub mod pointer;
pub mod rules;
pub mod session;
pub mod setup;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Camera, texture, arena and the initial stacks are spawned here.
    #[default]
    Setup,
    InGame,
}

#[derive(SubStates, Default, Debug, Clone, PartialEq, Eq, Hash)]
#[source(AppState = AppState::InGame)]
pub enum PausedState {
    Paused,
    #[default]
    Playing,
}

/// Per-frame ordering inside `Update`. Physics steps afterwards in
/// `PostUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Rules,
    Hud,
}

// z layers, bottom to top
pub const BACK_Z: f32 = 0.0;
pub const ENTRY_Z: f32 = 1.0;
pub const WALL_Z: f32 = 2.0;
pub const GROUND_Z: f32 = 3.0;
pub const BLOCK_Z: f32 = 4.0;
pub const HELD_Z: f32 = 5.0;
