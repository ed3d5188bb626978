use bevy::{
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use clap::Parser;
use laserbots::{audio, config, core, input, level, objects, robot, scene, settings, ui};

/// Command line options.
#[derive(Parser, Debug)]
#[command(name = "laserbots")]
struct Cli {
  /// Level to load (assets/levels/<name>.level.toml).
  #[arg(long, default_value = "level1")]
  level: String,

  /// Draw physics colliders and contacts.
  #[arg(long)]
  debug_physics: bool,
}

fn main() {
  let cli = Cli::parse();

  let config_str = std::fs::read_to_string("assets/config/game.config.toml")
    .expect("Failed to read config file");
  let config: config::GameConfig = toml::from_str(&config_str).expect("Failed to parse config");

  let mut app = App::new();

  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  app.add_plugins(
    DefaultPlugins
      .set(ImagePlugin::default_nearest())
      .set(WindowPlugin {
        primary_window: Some(Window {
          resolution: WindowResolution::new(config.window.width, config.window.height),
          title: config.window.title.clone(),
          present_mode: PresentMode::AutoVsync,
          ..default()
        }),
        ..default()
      }),
  );

  app.insert_resource(level::LevelSelection(cli.level.clone()));

  app
    .add_plugins(config::ConfigPlugin)
    .add_plugins(settings::SettingsPlugin)
    .add_plugins(core::CorePlugin {
      debug_physics: cli.debug_physics,
      length_unit: config.physics.length_unit,
    })
    .add_plugins(input::InputPlugin)
    .add_plugins(audio::GameAudioPlugin)
    .add_plugins(level::LevelPlugin)
    .add_plugins(objects::ObjectsPlugin)
    .add_plugins(robot::RobotPlugin)
    .add_plugins(scene::ScenePlugin)
    .add_plugins(ui::GameUiPlugin);

  app.run();
}
