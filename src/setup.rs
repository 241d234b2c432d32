// setup.rs
//! Exposes `FlaskGamePlugin`, which wires up:
//!
//! Simulation:
//! - physics plugin and gravity
//!
//! Graphics:
//! - shape plugin, camera, block texture
//!
//! Game:
//! - arena, initial stacks, score text
//! - pointer, merge, hud and keyboard plugins, ordered by `GameSet`
//!
//! The window itself is configured by the binary, see `window`.

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_prototype_lyon::plugin::ShapePlugin;
use bevy_rapier2d::prelude::*;

use crate::config::FlaskConfig;
use crate::image::load_block_texture;
use crate::layout::Layout;
use crate::session::Session;
use crate::{arena, block, hud, kbd, merge, pointer};
use crate::{AppState, GameSet, PausedState};

const PIXELS_PER_METER: f32 = 100.0;

#[derive(Component)]
pub struct MainCamera;

#[derive(Default)]
pub struct FlaskGamePlugin {
    pub config: FlaskConfig,
}

impl Plugin for FlaskGamePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(Layout::build(&self.config))
            .init_resource::<Session>()
            .init_state::<AppState>()
            .add_sub_state::<PausedState>()
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Rules, GameSet::Hud).chain(),
            )
            // Physics plugins
            .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
                PIXELS_PER_METER,
            ))
            .add_plugins(ShapePlugin)
            // my plugins
            .add_plugins((
                arena::plugin,
                block::plugin,
                pointer::plugin,
                merge::plugin,
                hud::plugin,
                kbd::plugin,
            ))
            .add_systems(PreStartup, load_block_texture)
            .add_systems(
                Startup,
                (
                    setup_graphics,
                    configure_gravity,
                    arena::spawn_arena,
                    block::spawn_blocks,
                    hud::spawn_score_text,
                    finish_setup,
                )
                    .chain(),
            );
    }
}

/// Primary window sized to fit the board.
pub fn window(cfg: &FlaskConfig) -> Window {
    let size = cfg.window_size();
    Window {
        title: "Interactive Project".into(),
        name: Some("flask-merge".into()),
        resolution: WindowResolution::new(size.x, size.y)
            .with_scale_factor_override(1.0),
        resizable: false,
        ..Default::default()
    }
}

/// Camera centered on the board so world coordinates match window pixels
/// with the origin at the bottom-left corner.
fn setup_graphics(mut commands: Commands, cfg: Res<FlaskConfig>) {
    let size = cfg.window_size();
    let mut camera = Camera2dBundle::default();
    camera.transform.translation.x = size.x / 2.0;
    camera.transform.translation.y = size.y / 2.0;
    commands.spawn(camera).insert(MainCamera);
}

fn configure_gravity(
    mut rapier: ResMut<RapierConfiguration>,
    cfg: Res<FlaskConfig>,
) {
    rapier.gravity = Vec2::new(0.0, -cfg.gravity);
}

fn finish_setup(mut next_state: ResMut<NextState<AppState>>) {
    info!("setup done");
    next_state.set(AppState::InGame);
}
