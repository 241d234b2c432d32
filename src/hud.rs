//! Score line at the bottom of the window.

use bevy::prelude::*;

use crate::block::block_records;
use crate::block::components::Block;
use crate::palette::TEXT_COLOR;
use crate::rules::has_won;
use crate::session::Session;
use crate::GameSet;

#[derive(Component)]
pub struct ScoreText;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, update_score_text.in_set(GameSet::Hud));
}

pub fn score_line(score: u32, won: bool) -> String {
    if won {
        "You won!".to_string()
    } else {
        format!("Score: {score}")
    }
}

pub fn spawn_score_text(mut commands: Commands) {
    commands
        .spawn(
            TextBundle::from_section(
                score_line(0, false),
                TextStyle {
                    font_size: 28.0,
                    color: TEXT_COLOR,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                left: Val::Percent(50.0),
                ..default()
            }),
        )
        .insert(Name::new("Score"))
        .insert(ScoreText);
}

/// Win state is recomputed from the remaining blocks every frame.
pub fn update_score_text(
    session: Res<Session>,
    blocks: Query<(Entity, &Block, &Transform)>,
    mut texts: Query<&mut Text, With<ScoreText>>,
) {
    let won = has_won(&block_records(blocks.iter()));
    let line = score_line(session.score, won);
    for mut text in texts.iter_mut() {
        match &mut text.sections[..] {
            [] => text
                .sections
                .push(TextSection::new(line.clone(), TextStyle::default())),
            [section, ..] => {
                if section.value != line {
                    section.value.clone_from(&line);
                }
            }
        }
    }
}
