//! Tunables of the autowalk, inserted as a [Resource] and copied into each walk when it
//! is requested
//!

use bevy::log::warn;
use bevy::prelude::{Reflect, Resource};

use crate::prelude::*;

/// Errors raised while loading [AutowalkSettings] from disk
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
	/// The file could not be opened or read
	#[error("failed reading settings file: {0}")]
	Io(#[from] std::io::Error),
	/// The contents are not valid settings
	#[cfg(feature = "ron")]
	#[error("failed deserializing settings: {0}")]
	Parse(#[from] ron::error::SpannedError),
}

/// Configuration of path searches and walks
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource, Reflect)]
pub struct AutowalkSettings {
	/// Node budget of a search, at most [PATHFINDER_MAX_NODES]
	pub max_nodes: usize,
	/// Walks to a target further than this many tiles are run
	pub run_distance: i32,
	/// Other characters never block the path
	pub ignore_stamina_check: bool,
	/// Doors are walked through as if already open
	pub smooth_doors: bool,
}

impl Default for AutowalkSettings {
	fn default() -> Self {
		AutowalkSettings {
			max_nodes: PATHFINDER_MAX_NODES,
			run_distance: 14,
			ignore_stamina_check: false,
			smooth_doors: false,
		}
	}
}

impl AutowalkSettings {
	/// Clamp values into their legal ranges
	pub fn sanitized(mut self) -> Self {
		if self.max_nodes > PATHFINDER_MAX_NODES {
			warn!(
				"max_nodes of {} exceeds the pool capacity, clamping to {}",
				self.max_nodes, PATHFINDER_MAX_NODES
			);
			self.max_nodes = PATHFINDER_MAX_NODES;
		}
		if self.max_nodes == 0 {
			warn!(
				"max_nodes of 0 would fail every search, using {}",
				PATHFINDER_MAX_NODES
			);
			self.max_nodes = PATHFINDER_MAX_NODES;
		}
		if self.run_distance < 0 {
			warn!("Negative run_distance {}, using 0", self.run_distance);
			self.run_distance = 0;
		}
		self
	}
	/// From a `ron` string generate the [AutowalkSettings], missing fields take their defaults
	#[cfg(feature = "ron")]
	pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
		let settings: AutowalkSettings = ron::from_str(source)?;
		Ok(settings.sanitized())
	}
	/// From a `ron` file generate the [AutowalkSettings]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
		let file = std::fs::File::open(path)?;
		let settings: AutowalkSettings = ron::de::from_reader(file)?;
		Ok(settings.sanitized())
	}
}
