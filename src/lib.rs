pub mod audio;
pub mod config;
pub mod core;
pub mod input;
pub mod level;
pub mod objects;
pub mod robot;
pub mod scene;
pub mod settings;
pub mod ui;
