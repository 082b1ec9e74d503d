//! `use bevy_autowalk_tiles_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::pathing::{
	collision::*, node_pool::*, search::*, step::*, tile_map::*, tiles::*, utilities::*,
	walker::*,
};

#[doc(hidden)]
pub use crate::{
	plugin::{walk_layer::*, *},
	settings::*,
};
