//! Defines the Bevy [Plugin] for autowalking
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod walk_layer;

/// Order of the autowalk systems within a tick, cancellations are seen before new
/// requests and a new request takes its first step in the same tick
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum AutowalkSet {
	/// Stop walks
	Cancel,
	/// Search for new paths
	Request,
	/// Step the current walk
	Advance,
}

/// Registers the [Autowalker] and [AutowalkSettings] resources, the walk events and the
/// systems serving them. Insert a [TileProvider] and a [ControlledMover] to use it
pub struct AutowalkPlugin;

impl Plugin for AutowalkPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Direction>()
			.register_type::<StepState>()
			.register_type::<SearchState>()
			.register_type::<WalkState>()
			.register_type::<AutowalkSettings>()
			.init_resource::<AutowalkSettings>()
			.init_resource::<Autowalker>()
			.add_event::<walk_layer::EventWalkRequest>()
			.add_event::<walk_layer::EventCancelWalk>()
			.add_event::<walk_layer::EventWalkEnded>()
			.configure_sets(
				Update,
				(AutowalkSet::Cancel, AutowalkSet::Request, AutowalkSet::Advance).chain(),
			)
			.add_systems(
				Update,
				(
					walk_layer::process_cancel_requests.in_set(AutowalkSet::Cancel),
					walk_layer::process_walk_requests.in_set(AutowalkSet::Request),
					walk_layer::advance_walk.in_set(AutowalkSet::Advance),
				),
			);
	}
}
