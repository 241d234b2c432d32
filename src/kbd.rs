use bevy::app::AppExit;
use bevy::input::common_conditions::input_just_pressed;
use bevy::prelude::*;

use crate::block::RestartGame;
use crate::{AppState, PausedState};

#[derive(Event, Debug)]
pub struct Pause;

pub fn plugin(app: &mut App) {
    app.add_event::<Pause>().add_systems(
        Update,
        (
            exit_on_escape,
            (get_pause_input, toggle_pause).chain(),
            restart.run_if(input_just_pressed(KeyCode::KeyR)),
        )
            .run_if(in_state(AppState::InGame)),
    );
}

/// Close the window on Esc.
pub fn exit_on_escape(
    kbd_input: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if kbd_input.just_pressed(KeyCode::Escape) {
        info!("escape pressed, exiting");
        exit.send(AppExit::Success);
    }
}

pub fn get_pause_input(
    kbd_input: Res<ButtonInput<KeyCode>>,
    mut pause: EventWriter<Pause>,
) {
    if kbd_input.just_pressed(KeyCode::KeyP) {
        pause.send(Pause);
    }
}

/// Toggle the pause state and virtual time. Physics runs on virtual time, so
/// it stops too.
pub fn toggle_pause(
    mut time: ResMut<Time<Virtual>>,
    mut pause: EventReader<Pause>,
    mut next_state: ResMut<NextState<PausedState>>,
) {
    for _ in pause.read() {
        if time.is_paused() {
            time.unpause();
            next_state.set(PausedState::Playing);
            info!("resumed");
        } else {
            time.pause();
            next_state.set(PausedState::Paused);
            info!("paused");
        }
    }
}

fn restart(mut commands: Commands) {
    commands.trigger(RestartGame);
}
