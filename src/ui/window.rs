//! End-of-level windows: level complete with a star row, and game over.
//! Both offer a reload button that sends the scene back through Loading.

use bevy::prelude::*;

use crate::level::LevelInfo;
use crate::scene::{LevelResult, Phase};

#[derive(Component)]
pub struct ResultWindow;

pub fn spawn_complete_window(mut commands: Commands, info: Res<LevelInfo>, result: Res<LevelResult>) {
  let stars: String = (1..=3u8)
    .map(|slot| if slot <= result.stars { '\u{2605}' } else { '\u{2606}' })
    .collect();

  spawn_window(
    &mut commands,
    &format!("{} complete!", info.name),
    Some(stars),
    "Play again",
  );
}

pub fn spawn_game_over_window(mut commands: Commands) {
  spawn_window(&mut commands, "Game over", None, "Try again");
}

pub fn despawn_windows(mut commands: Commands, windows: Query<Entity, With<ResultWindow>>) {
  for entity in &windows {
    commands.entity(entity).despawn();
  }
}

fn spawn_window(commands: &mut Commands, title: &str, stars: Option<String>, button: &str) {
  commands
    .spawn((
      ResultWindow,
      Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(16.0),
        ..default()
      },
      BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
    ))
    .with_children(|parent| {
      parent.spawn((
        Text::new(title),
        TextFont::from_font_size(48.0),
        TextColor(Color::WHITE),
      ));

      if let Some(stars) = stars {
        parent.spawn((
          Text::new(stars),
          TextFont::from_font_size(56.0),
          TextColor(Color::srgb(1.0, 0.85, 0.2)),
        ));
      }

      parent
        .spawn((
          Button,
          Node {
            width: Val::Px(180.0),
            height: Val::Px(48.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
          },
          BackgroundColor(Color::srgb(0.25, 0.25, 0.3)),
          children![(
            Text::new(button),
            TextFont::from_font_size(22.0),
            TextColor(Color::WHITE),
          )],
        ))
        .observe(on_reload);
    });
}

fn on_reload(_click: On<Pointer<Click>>, mut next_phase: ResMut<NextState<Phase>>) {
  next_phase.set(Phase::Loading);
}
