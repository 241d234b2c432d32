use bevy::input::common_conditions::{input_just_pressed, input_toggle_active};
use bevy::prelude::*;
use bevy_dev_tools::fps_overlay::{FpsOverlayConfig, FpsOverlayPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use bevy_rapier2d::render::{DebugRenderContext, RapierDebugRenderPlugin};

use crate::config::FlaskConfig;
use crate::layout::Layout;
use crate::session::Session;

/// F1: world inspector, F2: collider outlines, plus an FPS counter.
pub fn plugin(app: &mut App) {
    app.register_type::<FlaskConfig>()
        .register_type::<Layout>()
        .register_type::<Session>()
        .add_plugins(
            WorldInspectorPlugin::new()
                .run_if(input_toggle_active(false, KeyCode::F1)),
        )
        .add_plugins(RapierDebugRenderPlugin::default().disabled())
        .add_plugins(FpsOverlayPlugin {
            config: FpsOverlayConfig {
                text_config: TextStyle {
                    font_size: 16.0,
                    color: Color::BLACK,
                    ..default()
                },
                ..default()
            },
        })
        .add_systems(
            Update,
            toggle_debug_render.run_if(input_just_pressed(KeyCode::F2)),
        );
}

fn toggle_debug_render(mut ctx: ResMut<DebugRenderContext>) {
    ctx.enabled = !ctx.enabled;
    info!("rapier debug render: {}", ctx.enabled);
}
