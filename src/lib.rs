//! This is a plugin for Bevy game engine to find and walk paths across isometric tile
//! worlds where each tile holds a stack of objects at different heights
//!

pub mod pathing;
pub mod plugin;
pub mod settings;

pub mod prelude;
