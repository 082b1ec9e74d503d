//! Logic relating to requesting, cancelling and stepping an autowalk from Bevy systems
//!

use crate::prelude::*;
use bevy::prelude::*;

/// The map the autowalk searches and validates steps against
#[derive(Resource)]
pub struct TileProvider(Box<dyn TileQuery + Send + Sync>);

impl TileProvider {
	/// Create a new instance of [TileProvider]
	pub fn new(query: impl TileQuery + Send + Sync + 'static) -> Self {
		TileProvider(Box::new(query))
	}
	/// Get the map
	pub fn get_query(&self) -> &(dyn TileQuery + Send + Sync) {
		self.0.as_ref()
	}
	/// Get the map mutably, for swapping in freshly loaded data
	pub fn get_query_mut(&mut self) -> &mut (dyn TileQuery + Send + Sync) {
		self.0.as_mut()
	}
}

/// The entity the autowalk moves
#[derive(Resource)]
pub struct ControlledMover(Box<dyn MovementController + Send + Sync>);

impl ControlledMover {
	/// Create a new instance of [ControlledMover]
	pub fn new(controller: impl MovementController + Send + Sync + 'static) -> Self {
		ControlledMover(Box::new(controller))
	}
	/// Get the movement controller
	pub fn get_controller(&self) -> &(dyn MovementController + Send + Sync) {
		self.0.as_ref()
	}
	/// Get the movement controller mutably
	pub fn get_controller_mut(&mut self) -> &mut (dyn MovementController + Send + Sync) {
		self.0.as_mut()
	}
}

/// Ask the [ControlledMover] to walk to within `radius` tiles of a target
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWalkRequest {
	/// Target column
	target_x: i32,
	/// Target row
	target_y: i32,
	/// Chebyshev distance from the target that counts as arrival
	radius: i32,
}

impl EventWalkRequest {
	/// Create a new instance of [EventWalkRequest]
	pub fn new(target_x: i32, target_y: i32, radius: i32) -> Self {
		EventWalkRequest {
			target_x,
			target_y,
			radius,
		}
	}
	/// Get the target column and row
	pub fn get_target(&self) -> (i32, i32) {
		(self.target_x, self.target_y)
	}
	/// Get the goal radius
	pub fn get_radius(&self) -> i32 {
		self.radius
	}
}

/// Stop the current walk
#[derive(Event, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventCancelWalk {
	/// Cancel even when the walk is flagged as not cancellable
	force: bool,
}

impl EventCancelWalk {
	/// Cancel if the walk allows it
	pub fn new() -> Self {
		EventCancelWalk { force: false }
	}
	/// Cancel regardless of the cancellable flag
	pub fn forced() -> Self {
		EventCancelWalk { force: true }
	}
	/// Get whether the cancellable flag is overridden
	pub fn is_forced(&self) -> bool {
		self.force
	}
}

/// Sent whenever a walk stops, or a request leaves nothing to walk
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWalkEnded {
	/// How the walk stopped
	outcome: WalkState,
}

impl EventWalkEnded {
	/// Create a new instance of [EventWalkEnded]
	pub fn new(outcome: WalkState) -> Self {
		EventWalkEnded { outcome }
	}
	/// Get how the walk stopped
	pub fn get_outcome(&self) -> WalkState {
		self.outcome
	}
}

/// Read [EventCancelWalk] and stop the walk if allowed
pub fn process_cancel_requests(
	mut events: EventReader<EventCancelWalk>,
	mut walker: ResMut<Autowalker>,
	mut event_ended: EventWriter<EventWalkEnded>,
) {
	for event in events.read() {
		if !walker.is_walking() {
			continue;
		}
		if event.is_forced() || walker.is_cancellable() {
			walker.cancel();
			event_ended.write(EventWalkEnded::new(WalkState::Cancelled));
		} else {
			debug!("Ignoring cancel of a walk flagged as not cancellable");
		}
	}
}

/// Read [EventWalkRequest] and search for a path, only the latest request of a tick is served
pub fn process_walk_requests(
	mut events: EventReader<EventWalkRequest>,
	mut walker: ResMut<Autowalker>,
	settings: Res<AutowalkSettings>,
	tiles: Option<Res<TileProvider>>,
	mover: Option<Res<ControlledMover>>,
	mut event_ended: EventWriter<EventWalkEnded>,
) {
	let Some(event) = events.read().last().copied() else {
		return;
	};
	let (Some(tiles), Some(mover)) = (tiles, mover) else {
		warn!("Walk requested without a TileProvider and ControlledMover inserted");
		return;
	};
	let controller = mover.get_controller();
	if controller.get_entity_state().paralyzed {
		debug!("Walk request ignored, entity is paralyzed");
		return;
	}
	if walker.is_walking() {
		event_ended.write(EventWalkEnded::new(WalkState::Cancelled));
	}
	let (x, y) = event.get_target();
	let found = walker.request_walk(
		tiles.get_query(),
		controller,
		&settings,
		x,
		y,
		event.get_radius(),
	);
	if !found {
		debug!("No walkable path to ({}, {})", x, y);
		event_ended.write(EventWalkEnded::new(WalkState::NoPath));
	}
}

/// Step the walk once per tick and report when it ends
pub fn advance_walk(
	mut walker: ResMut<Autowalker>,
	tiles: Option<Res<TileProvider>>,
	mover: Option<ResMut<ControlledMover>>,
	mut event_ended: EventWriter<EventWalkEnded>,
) {
	if !walker.is_walking() {
		return;
	}
	let (Some(tiles), Some(mut mover)) = (tiles, mover) else {
		return;
	};
	let outcome = walker.advance(tiles.get_query(), mover.get_controller_mut());
	if outcome.is_finished() {
		event_ended.write(EventWalkEnded::new(outcome));
	}
}
