//! Physics contact dispatch.
//!
//! Rapier reports a contact as an unordered entity pair. Classification
//! checks both orderings against a requested category's group bits and
//! hands the matching entity to the right handler. A collider whose
//! category says "door" must carry a `Door` component; anything else is
//! corrupt level data and panics.

use bevy::{ecs::message::MessageReader, prelude::*};
use bevy_rapier2d::prelude::*;

use crate::audio::sound_effect;
use crate::config::ConfigLoaded;
use crate::core::category;
use crate::level::ObjectNames;
use crate::objects::switches::{self, DoorTouch};
use crate::objects::{Door, Harm, ObjectKind, ObjectName, Switch};
use crate::robot::{ActiveHarm, Robot, RobotMotion};
use crate::scene::Phase;
use crate::settings::UserSettings;

/// Returns whichever side of the pair belongs to `requested`, or `None`
/// when neither does. The physics engine does not guarantee an order, so
/// both sides are checked.
pub fn match_category(
  requested: Group,
  a: (Entity, &CollisionGroups),
  b: (Entity, &CollisionGroups),
) -> Option<Entity> {
  if a.1.memberships.intersects(requested) {
    Some(a.0)
  } else if b.1.memberships.intersects(requested) {
    Some(b.0)
  } else {
    None
  }
}

/// Object name for integrity panics, falling back to the entity id for
/// colliders spawned without one.
fn describe(entity: Entity, labels: &Query<&ObjectName>) -> String {
  labels
    .get(entity)
    .map(|name| name.0.clone())
    .unwrap_or_else(|_| format!("{entity:?}"))
}

pub fn handle_contacts(
  mut commands: Commands,
  mut collisions: MessageReader<CollisionEvent>,
  groups: Query<&CollisionGroups>,
  kinds: Query<&ObjectKind>,
  labels: Query<&ObjectName>,
  mut switch_query: Query<&mut Switch>,
  mut door_query: Query<&mut Door>,
  harm_query: Query<&Harm>,
  mut robots: Query<(&mut RobotMotion, &mut ActiveHarm), With<Robot>>,
  names: Res<ObjectNames>,
  mut next_phase: ResMut<NextState<Phase>>,
  asset_server: Res<AssetServer>,
  settings: Res<UserSettings>,
  config: Res<ConfigLoaded>,
) {
  for event in collisions.read() {
    let (first, second, started) = match event {
      CollisionEvent::Started(a, b, _) => (*a, *b, true),
      CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
    };

    let (Ok(first_groups), Ok(second_groups)) = (groups.get(first), groups.get(second)) else {
      continue;
    };
    let pair_a = (first, first_groups);
    let pair_b = (second, second_groups);

    if match_category(category::ROBOT, pair_a, pair_b).is_some() {
      let Ok((_, mut active_harm)) = robots.single_mut() else {
        continue;
      };

      if started {
        if let Some(door_entity) = match_category(category::DOOR, pair_a, pair_b) {
          let Ok(mut door) = door_query.get_mut(door_entity) else {
            panic!(
              "door-category collider '{}' without a Door component",
              describe(door_entity, &labels)
            );
          };
          match switches::robot_touch_door(&mut door) {
            DoorTouch::Opened => {
              if !settings.effects_muted {
                commands.spawn(sound_effect(
                  asset_server.load("sounds/door_open.ogg"),
                  config.audio.effects_volume,
                ));
              }
            }
            DoorTouch::Completed => next_phase.set(Phase::Completed),
            DoorTouch::Nothing => {}
          }
        } else if let Some(switch_entity) = match_category(category::SWITCH, pair_a, pair_b) {
          switches::robot_touch_switch(
            switch_entity,
            &names,
            &kinds,
            &mut switch_query,
            &mut door_query,
          );
        } else if let Some(harm_entity) = match_category(category::HARM, pair_a, pair_b) {
          let Ok(harm) = harm_query.get(harm_entity) else {
            panic!(
              "harm-category collider '{}' without a Harm component",
              describe(harm_entity, &labels)
            );
          };
          active_harm.0.insert(harm_entity, harm.damage);
        }
      } else if let Some(harm_entity) = match_category(category::HARM, pair_a, pair_b) {
        active_harm.0.remove(&harm_entity);
      }
    } else if match_category(category::FEET, pair_a, pair_b).is_some() {
      let on_walkable = match_category(category::WALK_ON, pair_a, pair_b).is_some()
        || match_category(category::WORLD, pair_a, pair_b).is_some();
      if !on_walkable {
        continue;
      }

      let Ok((mut motion, _)) = robots.single_mut() else {
        continue;
      };
      if started {
        motion.ground_contacts += 1;
        motion.airborne = false;
      } else {
        motion.ground_contacts = motion.ground_contacts.saturating_sub(1);
        if motion.ground_contacts == 0 {
          motion.airborne = true;
        }
      }
    }
  }
}
