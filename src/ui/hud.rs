//! In-game HUD: shield bar, level clock, countdown overlay, pause button.

use bevy::prelude::*;

use crate::level::LevelInfo;
use crate::robot::{Robot, Shield};
use crate::scene::countdown::CountdownDisplay;
use crate::scene::{ElapsedTime, Phase};

#[derive(Component)]
pub struct ShieldBarFill;

#[derive(Component)]
pub struct ShieldText;

#[derive(Component)]
pub struct TimeText;

#[derive(Component)]
pub struct CountdownText;

#[derive(Component)]
pub struct PauseButtonText;

/// Formats elapsed seconds as mm:ss.
pub fn format_time(seconds: f32) -> String {
  let total = seconds.max(0.0) as u32;
  format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn spawn_hud(mut commands: Commands) {
  commands
    .spawn((
      Name::new("hud"),
      Node {
        width: Val::Percent(100.0),
        padding: UiRect::all(Val::Px(12.0)),
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        ..default()
      },
      children![
        // Shield bar: a fixed frame with a fill whose width tracks the
        // shield percentage, plus a numeric label.
        (
          Node {
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            ..default()
          },
          children![
            (
              Node {
                width: Val::Px(220.0),
                height: Val::Px(22.0),
                padding: UiRect::all(Val::Px(2.0)),
                ..default()
              },
              BackgroundColor(Color::srgb(0.15, 0.15, 0.15)),
              children![(
                ShieldBarFill,
                Node {
                  width: Val::Percent(100.0),
                  height: Val::Percent(100.0),
                  ..default()
                },
                BackgroundColor(Color::srgb(0.2, 0.75, 0.3)),
              )],
            ),
            (
              ShieldText,
              Text::new("100%"),
              TextFont::from_font_size(18.0),
              TextColor(Color::WHITE),
            ),
          ],
        ),
        (
          TimeText,
          Text::new("00:00"),
          TextFont::from_font_size(28.0),
          TextColor(Color::WHITE),
        ),
      ],
    ))
    .with_children(|parent| {
      parent
        .spawn((
          Button,
          Node {
            width: Val::Px(90.0),
            height: Val::Px(36.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
          },
          BackgroundColor(Color::srgb(0.25, 0.25, 0.3)),
          children![(
            PauseButtonText,
            Text::new("Pause"),
            TextFont::from_font_size(18.0),
            TextColor(Color::WHITE),
          )],
        ))
        .observe(on_pause_button);
    });

  commands.spawn((
    CountdownText,
    Text::new(""),
    TextFont::from_font_size(96.0),
    TextColor(Color::srgb(1.0, 0.85, 0.2)),
    Node {
      position_type: PositionType::Absolute,
      left: Val::Percent(46.0),
      top: Val::Percent(35.0),
      ..default()
    },
  ));
}

fn on_pause_button(
  _click: On<Pointer<Click>>,
  phase: Res<State<Phase>>,
  mut next_phase: ResMut<NextState<Phase>>,
) {
  match phase.get() {
    Phase::Playing => next_phase.set(Phase::Paused),
    Phase::Paused => next_phase.set(Phase::Playing),
    _ => {}
  }
}

pub fn update_shield_bar(
  shields: Query<&Shield, With<Robot>>,
  mut fills: Query<(&mut Node, &mut BackgroundColor), With<ShieldBarFill>>,
) {
  let Ok(shield) = shields.single() else {
    return;
  };
  for (mut node, mut color) in fills.iter_mut() {
    node.width = Val::Percent(shield.0.clamp(0.0, 100.0));
    color.0 = if shield.0 > 30.0 {
      Color::srgb(0.2, 0.75, 0.3)
    } else {
      Color::srgb(0.85, 0.2, 0.15)
    };
  }
}

pub fn update_shield_text(
  shields: Query<&Shield, With<Robot>>,
  mut texts: Query<&mut Text, With<ShieldText>>,
) {
  let Ok(shield) = shields.single() else {
    return;
  };
  for mut text in texts.iter_mut() {
    let formatted = format!("{:.0}%", shield.0.clamp(0.0, 100.0));
    if text.0 != formatted {
      text.0 = formatted;
    }
  }
}

pub fn update_time_text(
  elapsed: Res<ElapsedTime>,
  info: Option<Res<LevelInfo>>,
  mut texts: Query<&mut Text, With<TimeText>>,
) {
  let formatted = match &info {
    Some(info) => format!(
      "{} / {}",
      format_time(elapsed.0),
      format_time(info.time_limit as f32)
    ),
    None => format_time(elapsed.0),
  };
  for mut text in texts.iter_mut() {
    if text.0 != formatted {
      text.0 = formatted.clone();
    }
  }
}

pub fn update_countdown_text(
  display: Res<CountdownDisplay>,
  mut texts: Query<&mut Text, With<CountdownText>>,
) {
  if !display.is_changed() {
    return;
  }
  for mut text in texts.iter_mut() {
    text.0 = display.0.unwrap_or("").to_string();
  }
}

pub fn update_pause_button_label(
  phase: Res<State<Phase>>,
  mut texts: Query<&mut Text, With<PauseButtonText>>,
) {
  let label = match phase.get() {
    Phase::Paused => "Resume",
    _ => "Pause",
  };
  for mut text in texts.iter_mut() {
    if text.0 != label {
      text.0 = label.to_string();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn time_formats_as_minutes_and_seconds() {
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(59.9), "00:59");
    assert_eq!(format_time(60.0), "01:00");
    assert_eq!(format_time(605.4), "10:05");
  }

  #[test]
  fn negative_time_clamps_to_zero() {
    assert_eq!(format_time(-3.0), "00:00");
  }
}
