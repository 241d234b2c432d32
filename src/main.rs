use bevy::prelude::*;
use flask_merge::config::FlaskConfig;
use flask_merge::debug;
use flask_merge::setup::{window, FlaskGamePlugin};

fn main() {
    let config = FlaskConfig::default();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window(&config)),
        ..Default::default()
    }))
    .add_plugins(FlaskGamePlugin { config })
    .add_plugins(debug::plugin);

    // `flask-merge --dump-schedule | dot -Tsvg > update.svg`
    if std::env::args().any(|arg| arg == "--dump-schedule") {
        bevy_mod_debugdump::print_schedule_graph(&mut app, Update);
        return;
    }

    app.run();
}
