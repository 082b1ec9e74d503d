//! Bounded A* over the walkable tile graph.
//!
//! Edges come from [try_step], every tile is a node keyed by `(x, y, z)` so the same
//! column can be visited once per floor. Frontier nodes live in an open [NodePool] and
//! finalised nodes in a closed one. Each iteration expands the newest closed node into
//! the open pool and then promotes the cheapest open node:
//!
//! ```text
//!  closed[0] = start
//!  loop:
//!      expand current closed node in all 8 directions -> open pool
//!      any inserted node within the goal radius?      -> Succeeded
//!      move cheapest open node to the closed pool     -> none left: Failed
//!      closed pool reached the node budget?           -> Failed
//! ```
//!
//! The whole search runs synchronously inside one call, the node budget is what caps
//! its latency
//!

use bevy::log::{debug, trace};
use bevy::prelude::Reflect;

use crate::prelude::*;

/// Lifecycle of a [PathSearch]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SearchState {
	/// No search has run yet
	#[default]
	Idle,
	/// A search is in progress
	Searching,
	/// The last search found a path
	Succeeded,
	/// The last search ran out of nodes or frontier
	Failed,
}

/// The route found by a search, ordered from the start tile to the goal tile. Each node
/// holds the direction walked to reach it from the node before
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkPath(Vec<PathNode>);

impl WalkPath {
	/// Create a new instance of [WalkPath]
	pub fn new(nodes: Vec<PathNode>) -> Self {
		WalkPath(nodes)
	}
	/// Get the nodes of the path
	pub fn get(&self) -> &Vec<PathNode> {
		&self.0
	}
	/// Number of nodes including the start
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether the path has no nodes at all
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Number of steps to walk, the start tile is not walked
	pub fn get_step_count(&self) -> usize {
		self.0.len().saturating_sub(1)
	}
	/// Get the final node
	pub fn get_goal(&self) -> Option<&PathNode> {
		self.0.last()
	}
}

/// A* engine owning both node pools so they are allocated once and recycled by every search
#[derive(Debug, Clone)]
pub struct PathSearch {
	/// Frontier
	open: NodePool,
	/// Finalised nodes, parents of open nodes always live here
	closed: NodePool,
	/// Outcome of the latest search
	state: SearchState,
	/// Target column and row
	goal: (i32, i32),
	/// Chebyshev distance from the goal that counts as arrival
	radius: i32,
}

impl Default for PathSearch {
	fn default() -> Self {
		PathSearch::new()
	}
}

impl PathSearch {
	/// Create a new instance of [PathSearch] with pools of [PATHFINDER_MAX_NODES]
	pub fn new() -> Self {
		PathSearch::with_capacity(PATHFINDER_MAX_NODES)
	}
	/// Create a new instance of [PathSearch] with pools of `capacity` nodes
	pub fn with_capacity(capacity: usize) -> Self {
		PathSearch {
			open: NodePool::new(capacity),
			closed: NodePool::new(capacity),
			state: SearchState::Idle,
			goal: (0, 0),
			radius: 0,
		}
	}
	/// Get the outcome of the latest search
	pub fn get_state(&self) -> SearchState {
		self.state
	}
	/// Number of nodes finalised by the latest search
	pub fn get_closed_count(&self) -> usize {
		self.closed.get_active_count()
	}
	/// Number of frontier nodes left over from the latest search
	pub fn get_open_count(&self) -> usize {
		self.open.get_active_count()
	}
	/// Search for a route from `start` to any tile within `radius` of `goal`.
	///
	/// At most `max_nodes` nodes are finalised (clamped to the pool capacity) before the
	/// search gives up. A start already within the radius gives a path holding only the
	/// start node
	pub fn find_path(
		&mut self,
		query: &dyn TileQuery,
		context: StepContext,
		start: (i32, i32, i32),
		goal: (i32, i32),
		radius: i32,
		max_nodes: usize,
	) -> Option<WalkPath> {
		self.open.reset();
		self.closed.reset();
		self.state = SearchState::Searching;
		self.goal = goal;
		self.radius = radius;
		let max_nodes = max_nodes.min(self.closed.get_capacity());
		let path = self.run(query, context, start, max_nodes);
		match &path {
			Some(p) => {
				self.state = SearchState::Succeeded;
				debug!(
					"Path of {} steps found to {:?} after closing {} nodes",
					p.get_step_count(),
					goal,
					self.get_closed_count()
				);
			}
			None => {
				self.state = SearchState::Failed;
				debug!(
					"No path to {:?} from {:?}, closed {} nodes",
					goal,
					start,
					self.get_closed_count()
				);
			}
		}
		path
	}
	/// The search loop
	fn run(
		&mut self,
		query: &dyn TileQuery,
		context: StepContext,
		start: (i32, i32, i32),
		max_nodes: usize,
	) -> Option<WalkPath> {
		let (x, y, z) = start;
		let dist_from_goal = chebyshev_distance((x, y), self.goal);
		let root = PathNode::new(x, y, z, Direction::default(), 0, dist_from_goal, None);
		let mut current = self.closed.insert(root)?;
		if dist_from_goal <= self.radius {
			return Some(WalkPath::new(vec![root]));
		}
		let mut resolver = CollisionResolver::new(query, context);
		loop {
			if let Some(goal_slot) = self.open_nodes(&mut resolver, current) {
				return self.build_path(goal_slot);
			}
			current = self.close_cheapest()?;
			if self.closed.get_active_count() >= max_nodes {
				trace!("Node budget of {} exhausted", max_nodes);
				return None;
			}
		}
	}
	/// Expand the closed node in `parent_slot` in every direction. Returns the open slot
	/// of the first node inserted within the goal radius
	fn open_nodes(&mut self, resolver: &mut CollisionResolver, parent_slot: usize) -> Option<usize> {
		let parent = *self.closed.get(parent_slot)?;
		for direction in Direction::ALL {
			let Some(step) = try_step(resolver, parent.x, parent.y, parent.z, direction) else {
				continue;
			};
			// a diagonal that slid onto an orthogonal is reached by that orthogonal itself
			if step.direction != direction {
				continue;
			}
			if let Some(goal_slot) = self.add_open_node(step, &parent, parent_slot) {
				return Some(goal_slot);
			}
		}
		None
	}
	/// Insert or relax the open node reached by `step`. Returns its slot if it is newly
	/// inserted and satisfies the goal radius
	fn add_open_node(
		&mut self,
		step: StepOutcome,
		parent: &PathNode,
		parent_slot: usize,
	) -> Option<usize> {
		if self.closed.find(step.x, step.y, step.z).is_some() {
			return None;
		}
		let dist_from_start = parent.dist_from_start + 1;
		if let Some(slot) = self.open.find(step.x, step.y, step.z) {
			if let Some(node) = self.open.get_mut(slot) {
				if node.dist_from_start > dist_from_start {
					node.parent = Some(parent_slot);
					node.direction = step.direction;
					node.dist_from_start = dist_from_start;
					node.cost = dist_from_start.saturating_add(node.dist_from_goal);
				}
			}
			return None;
		}
		let dist_from_goal = chebyshev_distance((step.x, step.y), self.goal);
		let node = PathNode::new(
			step.x,
			step.y,
			step.z,
			step.direction,
			dist_from_start,
			dist_from_goal,
			Some(parent_slot),
		);
		// a full open pool simply drops the neighbour
		let slot = self.open.insert(node)?;
		(dist_from_goal <= self.radius).then_some(slot)
	}
	/// Move the cheapest open node into the closed pool, returning its closed slot
	fn close_cheapest(&mut self) -> Option<usize> {
		let slot = self.open.cheapest()?;
		let node = self.open.release(slot)?;
		self.closed.insert(node)
	}
	/// Walk the parents of the open node in `goal_slot` back to the root
	fn build_path(&self, goal_slot: usize) -> Option<WalkPath> {
		let goal = *self.open.get(goal_slot)?;
		let mut nodes = vec![goal];
		let mut parent = goal.parent;
		while let Some(slot) = parent {
			let node = self.closed.get(slot)?;
			nodes.push(*node);
			parent = node.parent;
		}
		nodes.reverse();
		Some(WalkPath::new(nodes))
	}
}
