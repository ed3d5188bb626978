use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  FootstepsLoop, MovementIntent, Robot, RobotMotion, RobotMovement, RobotState,
};
use crate::audio::sound_effect;
use crate::input::{Jump, Move, RobotInput};
use crate::settings::UserSettings;

/// Pure state decision, evaluated once per frame. Airborne wins over
/// horizontal intent, horizontal intent over idle.
pub fn decide_state(airborne: bool, left: bool, right: bool) -> RobotState {
  if airborne {
    RobotState::Jumping
  } else if left || right {
    RobotState::Running
  } else {
    RobotState::Idle
  }
}

/// Refreshes the robot's movement intent from the input actions.
pub fn read_intent(
  mut robots: Query<(&Actions<RobotInput>, &mut MovementIntent), With<Robot>>,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  jump_actions: Query<&ActionState, With<Action<Jump>>>,
) {
  for (actions, mut intent) in &mut robots {
    let mut axis = 0.0;
    let mut jump = false;

    for action_entity in actions.iter() {
      if let Ok((action, action_state)) = move_actions.get(action_entity) {
        if matches!(action_state, ActionState::Fired | ActionState::Ongoing) {
          axis = **action;
        }
      }
      if let Ok(action_state) = jump_actions.get(action_entity) {
        if matches!(action_state, ActionState::Fired | ActionState::Ongoing) {
          jump = true;
        }
      }
    }

    intent.left = axis < 0.0;
    intent.right = axis > 0.0;
    intent.jump = jump;
  }
}

/// Recomputes horizontal velocity from intent. Vertical velocity is left
/// alone so gravity and a jump impulse applied this frame survive.
pub fn apply_movement(
  mut robots: Query<(&MovementIntent, &RobotMovement, &mut Velocity, &mut Sprite), With<Robot>>,
) {
  for (intent, movement, mut velocity, mut sprite) in &mut robots {
    let direction = (intent.right as i8 - intent.left as i8) as f32;
    velocity.linvel.x = direction * movement.walk_speed;

    if intent.left {
      sprite.flip_x = true;
    } else if intent.right {
      sprite.flip_x = false;
    }
  }
}

/// Edge-triggered jump: the impulse fires once on the rising edge of the
/// jump input while grounded. Holding the button keeps the latch set;
/// releasing it re-arms.
pub fn apply_jump(
  mut robots: Query<
    (
      &MovementIntent,
      &RobotMovement,
      &mut RobotMotion,
      &mut ExternalImpulse,
    ),
    With<Robot>,
  >,
) {
  for (intent, movement, mut motion, mut impulse) in &mut robots {
    if intent.jump {
      if !motion.jump_held {
        if !motion.airborne {
          impulse.impulse.y += movement.jump_impulse;
          motion.airborne = true;
        }
        motion.jump_held = true;
      }
    } else {
      motion.jump_held = false;
    }
  }
}

/// Applies `decide_state` and fires exit/enter side effects only on an
/// actual change: animation swap, footsteps loop stop/start, one-shot jump
/// sound on entering Jumping.
pub fn update_state(
  mut commands: Commands,
  mut robots: Query<(&MovementIntent, &RobotMotion, &mut RobotState), With<Robot>>,
  footsteps: Query<&AudioSink, With<FootstepsLoop>>,
  asset_server: Res<AssetServer>,
  settings: Res<UserSettings>,
) {
  for (intent, motion, mut state) in &mut robots {
    let wanted = decide_state(motion.airborne, intent.left, intent.right);
    if wanted == *state {
      continue;
    }
    *state = wanted;
    trace!("robot anim -> {}", wanted.anim());

    let footsteps_active = wanted == RobotState::Running;
    for sink in &footsteps {
      if footsteps_active && !settings.effects_muted {
        sink.play();
      } else {
        sink.pause();
      }
    }

    if wanted == RobotState::Jumping && !settings.effects_muted {
      commands.spawn(sound_effect(asset_server.load("sounds/jump.ogg"), 0.5));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decide_state_is_priority_ordered() {
    // Airborne wins no matter the horizontal intent.
    for left in [false, true] {
      for right in [false, true] {
        assert_eq!(decide_state(true, left, right), RobotState::Jumping);
      }
    }
    // Grounded: any horizontal intent runs, none idles.
    assert_eq!(decide_state(false, true, false), RobotState::Running);
    assert_eq!(decide_state(false, false, true), RobotState::Running);
    assert_eq!(decide_state(false, true, true), RobotState::Running);
    assert_eq!(decide_state(false, false, false), RobotState::Idle);
  }

  fn jump_test_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_systems(Update, apply_jump);
    let robot = app
      .world_mut()
      .spawn((
        Robot,
        MovementIntent::default(),
        RobotMovement {
          walk_speed: 1000.0,
          jump_impulse: 2600.0,
        },
        RobotMotion::default(),
        ExternalImpulse::default(),
      ))
      .id();
    (app, robot)
  }

  fn set_jump(app: &mut App, robot: Entity, jump: bool) {
    app.world_mut().get_mut::<MovementIntent>(robot).unwrap().jump = jump;
  }

  fn impulse_y(app: &App, robot: Entity) -> f32 {
    app.world().get::<ExternalImpulse>(robot).unwrap().impulse.y
  }

  fn clear_impulse(app: &mut App, robot: Entity) {
    app
      .world_mut()
      .get_mut::<ExternalImpulse>(robot)
      .unwrap()
      .impulse = Vec2::ZERO;
  }

  #[test]
  fn jump_fires_once_per_press() {
    let (mut app, robot) = jump_test_app();

    set_jump(&mut app, robot, true);
    app.update();
    assert_eq!(impulse_y(&app, robot), 2600.0);

    // Button still held for several frames: no re-fire.
    clear_impulse(&mut app, robot);
    app.update();
    app.update();
    assert_eq!(impulse_y(&app, robot), 0.0);
  }

  #[test]
  fn jump_retriggers_after_release_and_landing() {
    let (mut app, robot) = jump_test_app();

    set_jump(&mut app, robot, true);
    app.update();
    clear_impulse(&mut app, robot);

    // Release mid-air, press again before landing: still airborne, no fire.
    set_jump(&mut app, robot, false);
    app.update();
    set_jump(&mut app, robot, true);
    app.update();
    assert_eq!(impulse_y(&app, robot), 0.0);

    // Land (feet contact clears airborne), release, press: fires again.
    set_jump(&mut app, robot, false);
    app.update();
    app.world_mut().get_mut::<RobotMotion>(robot).unwrap().airborne = false;
    set_jump(&mut app, robot, true);
    app.update();
    assert_eq!(impulse_y(&app, robot), 2600.0);
  }

  #[test]
  fn held_jump_does_not_fire_on_landing() {
    let (mut app, robot) = jump_test_app();

    set_jump(&mut app, robot, true);
    app.update();
    clear_impulse(&mut app, robot);

    // Land while the button is still held: latch must block the impulse.
    app.world_mut().get_mut::<RobotMotion>(robot).unwrap().airborne = false;
    app.update();
    assert_eq!(impulse_y(&app, robot), 0.0);
  }
}
