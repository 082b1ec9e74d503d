//! Walking a found path one tile per tick.
//!
//! The [Autowalker] holds the latest [WalkPath] and a cursor into it. Each eligible tick
//! it turns the entity to face the next node or, once facing it, re-validates the step
//! against the current map and issues it through a [MovementController]
//!

use bevy::log::debug;
use bevy::prelude::{Reflect, Resource};

use crate::prelude::*;

/// The entity being walked, implemented by whatever owns its movement
pub trait MovementController {
	/// Position and condition of the entity once its queued steps complete
	fn get_entity_state(&self) -> EntityState;
	/// Whether the movement rate allows another step this tick
	fn can_step_now(&self) -> bool;
	/// Turn towards or step in `direction`. An entity not yet facing `direction` only
	/// turns. Returns `false` if the entity refuses to move
	fn try_execute_step(&mut self, direction: Direction, run: bool) -> bool;
}

/// Progress of the current walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WalkState {
	/// Nothing has been requested
	#[default]
	Idle,
	/// Following a path
	Walking,
	/// Reached the end of the path
	Completed,
	/// Stopped by a blocked tile or a refused step
	Aborted,
	/// Stopped on request
	Cancelled,
	/// The latest request left nothing to walk, the target is unreachable or the entity
	/// already stands within range of it
	NoPath,
}

impl WalkState {
	/// Whether the state ends a walk
	pub fn is_finished(&self) -> bool {
		matches!(
			self,
			WalkState::Completed | WalkState::Aborted | WalkState::Cancelled | WalkState::NoPath
		)
	}
}

/// Path executor, owns the search engine so its node pools are reused by every request
#[derive(Resource)]
pub struct Autowalker {
	/// Search engine
	search: PathSearch,
	/// Path being walked, empty when idle
	path: WalkPath,
	/// Index of the next node to walk
	cursor: usize,
	/// Progress
	state: WalkState,
	/// Whether the user may interrupt the walk
	cancellable: bool,
	/// Whether steps are run
	running: bool,
	/// Settings the walk was requested with
	settings: AutowalkSettings,
}

impl Default for Autowalker {
	fn default() -> Self {
		Autowalker::new()
	}
}

impl Autowalker {
	/// Create a new instance of [Autowalker]
	pub fn new() -> Self {
		Autowalker {
			search: PathSearch::new(),
			path: WalkPath::default(),
			cursor: 0,
			state: WalkState::Idle,
			cancellable: true,
			running: false,
			settings: AutowalkSettings::default(),
		}
	}
	/// Get the progress of the walk
	pub fn get_state(&self) -> WalkState {
		self.state
	}
	/// Get the path being walked
	pub fn get_path(&self) -> &WalkPath {
		&self.path
	}
	/// Get the index of the next node to walk
	pub fn get_cursor(&self) -> usize {
		self.cursor
	}
	/// Get the search engine, useful to inspect the outcome of the last request
	pub fn get_search(&self) -> &PathSearch {
		&self.search
	}
	/// Number of path nodes not yet walked
	pub fn get_remaining_steps(&self) -> usize {
		self.path.len().saturating_sub(self.cursor)
	}
	/// Whether a walk is in progress
	pub fn is_walking(&self) -> bool {
		self.state == WalkState::Walking
	}
	/// Whether the user may interrupt the walk
	pub fn is_cancellable(&self) -> bool {
		self.cancellable
	}
	/// Allow or forbid the user to interrupt the walk
	pub fn set_cancellable(&mut self, cancellable: bool) {
		self.cancellable = cancellable;
	}
	/// Whether the walk is run
	pub fn is_running(&self) -> bool {
		self.running
	}
	/// Search for a path from the entity to within `radius` of `(x, y)` and start
	/// walking it. Any walk already in progress is dropped, unless the entity is paralyzed
	/// in which case the request is refused and the current walk carries on.
	///
	/// Returns whether there is at least one step to walk, otherwise the state becomes
	/// [WalkState::NoPath]
	pub fn request_walk(
		&mut self,
		query: &dyn TileQuery,
		mover: &dyn MovementController,
		settings: &AutowalkSettings,
		x: i32,
		y: i32,
		radius: i32,
	) -> bool {
		let entity = mover.get_entity_state();
		if entity.paralyzed {
			debug!("Autowalk refused, entity is paralyzed");
			return false;
		}
		self.reset(WalkState::Idle);
		self.cancellable = true;
		let settings = settings.sanitized();
		self.settings = settings;
		let context = StepContext::new(&entity, &settings);
		let start = (entity.x, entity.y, entity.z);
		match self
			.search
			.find_path(query, context, start, (x, y), radius, settings.max_nodes)
		{
			Some(path) if path.get_step_count() > 0 => {
				self.running = chebyshev_distance((entity.x, entity.y), (x, y)) > settings.run_distance;
				debug!(
					"Autowalk to ({}, {}) started, {} steps, running: {}",
					x,
					y,
					path.get_step_count(),
					self.running
				);
				self.path = path;
				self.cursor = 1;
				self.state = WalkState::Walking;
				true
			}
			_ => {
				self.state = WalkState::NoPath;
				false
			}
		}
	}
	/// Make progress on the walk, called once per tick. Does nothing unless walking and
	/// `mover` allows a step this tick
	pub fn advance(
		&mut self,
		query: &dyn TileQuery,
		mover: &mut dyn MovementController,
	) -> WalkState {
		if self.state != WalkState::Walking || !mover.can_step_now() {
			return self.state;
		}
		let Some(node) = self.path.get().get(self.cursor).copied() else {
			return self.finish(WalkState::Completed);
		};
		let entity = mover.get_entity_state();
		if entity.facing == node.direction {
			// the entity is about to move, the tile may have been blocked since the search
			let context = StepContext::new(&entity, &self.settings);
			let mut resolver = CollisionResolver::new(query, context);
			match try_step(&mut resolver, entity.x, entity.y, entity.z, node.direction) {
				Some(step) if step.direction == node.direction => self.cursor += 1,
				_ => {
					debug!(
						"Autowalk blocked at ({}, {}) heading {:?}",
						entity.x, entity.y, node.direction
					);
					return self.finish(WalkState::Aborted);
				}
			}
		}
		if !mover.try_execute_step(node.direction, self.running) {
			debug!("Autowalk step {:?} refused by the entity", node.direction);
			return self.finish(WalkState::Aborted);
		}
		self.state
	}
	/// Stop the walk, a no-op when not walking
	pub fn cancel(&mut self) {
		if self.is_walking() {
			self.finish(WalkState::Cancelled);
		}
	}
	/// End the walk with `state`
	fn finish(&mut self, state: WalkState) -> WalkState {
		debug!("Autowalk ended: {:?}", state);
		self.reset(state);
		state
	}
	/// Drop the path and enter `state`
	fn reset(&mut self, state: WalkState) {
		self.path = WalkPath::default();
		self.cursor = 0;
		self.running = false;
		self.state = state;
	}
}
