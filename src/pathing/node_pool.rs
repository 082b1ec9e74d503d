//! Fixed capacity arena of search nodes. The search owns two of these, an open pool for
//! the frontier and a closed pool for finalised nodes, and recycles both between
//! requests so no allocation happens while a search runs.
//!
//! Slots are handed out by scanning for the first one not in use. Scans stop at the
//! high-water mark, the highest slot handed out since the last reset, so a short search
//! never walks the whole arena
//!

use crate::prelude::*;

/// A tile reached by the search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
	/// Column
	pub x: i32,
	/// Row
	pub y: i32,
	/// Landing height
	pub z: i32,
	/// Direction walked to get here from the parent
	pub direction: Direction,
	/// Whether the slot holds a live node
	pub used: bool,
	/// `dist_from_start + dist_from_goal`
	pub cost: i32,
	/// Steps taken from the start
	pub dist_from_start: i32,
	/// Heuristic distance to the goal
	pub dist_from_goal: i32,
	/// Slot of the parent within the closed pool, `None` for the root
	pub parent: Option<usize>,
}

impl PathNode {
	/// Create a live node at `(x, y, z)` entered via `direction`
	pub fn new(
		x: i32,
		y: i32,
		z: i32,
		direction: Direction,
		dist_from_start: i32,
		dist_from_goal: i32,
		parent: Option<usize>,
	) -> Self {
		PathNode {
			x,
			y,
			z,
			direction,
			used: true,
			cost: dist_from_start.saturating_add(dist_from_goal),
			dist_from_start,
			dist_from_goal,
			parent,
		}
	}
	/// Whether the node sits at `(x, y, z)`
	pub fn is_at(&self, x: i32, y: i32, z: i32) -> bool {
		self.x == x && self.y == y && self.z == z
	}
}

/// Arena of [PathNode]s addressed by slot index
#[derive(Debug, Clone)]
pub struct NodePool {
	/// Every slot, allocated once
	nodes: Vec<PathNode>,
	/// One past the highest slot used since the last reset
	high_water: usize,
	/// Number of slots currently in use
	active: usize,
}

impl NodePool {
	/// Create a new instance of [NodePool] with `capacity` slots
	pub fn new(capacity: usize) -> Self {
		NodePool {
			nodes: vec![PathNode::default(); capacity],
			high_water: 0,
			active: 0,
		}
	}
	/// Free every slot
	pub fn reset(&mut self) {
		for node in self.nodes[..self.high_water].iter_mut() {
			node.used = false;
		}
		self.high_water = 0;
		self.active = 0;
	}
	/// Get the number of slots
	pub fn get_capacity(&self) -> usize {
		self.nodes.len()
	}
	/// Get the number of live nodes
	pub fn get_active_count(&self) -> usize {
		self.active
	}
	/// Get one past the highest slot used since the last reset
	pub fn get_high_water(&self) -> usize {
		self.high_water
	}
	/// Store `node` in the first free slot, `None` if the pool is full
	pub fn insert(&mut self, node: PathNode) -> Option<usize> {
		let slot = match self.nodes[..self.high_water]
			.iter()
			.position(|n| !n.used)
		{
			Some(slot) => slot,
			None if self.high_water < self.nodes.len() => {
				self.high_water += 1;
				self.high_water - 1
			}
			None => return None,
		};
		self.nodes[slot] = PathNode { used: true, ..node };
		self.active += 1;
		Some(slot)
	}
	/// Find the slot of the live node at `(x, y, z)`
	pub fn find(&self, x: i32, y: i32, z: i32) -> Option<usize> {
		self.nodes[..self.high_water]
			.iter()
			.position(|n| n.used && n.is_at(x, y, z))
	}
	/// Get the live node of a slot
	pub fn get(&self, slot: usize) -> Option<&PathNode> {
		self.nodes.get(slot).filter(|n| n.used)
	}
	/// Get the live node of a slot mutably
	pub fn get_mut(&mut self, slot: usize) -> Option<&mut PathNode> {
		self.nodes.get_mut(slot).filter(|n| n.used)
	}
	/// Free a slot and return the node it held
	pub fn release(&mut self, slot: usize) -> Option<PathNode> {
		let node = self.get_mut(slot)?;
		node.used = false;
		let released = *node;
		self.active -= 1;
		Some(released)
	}
	/// Slot of the live node with the lowest total cost, the lowest slot wins ties
	pub fn cheapest(&self) -> Option<usize> {
		let mut cheapest: Option<(usize, i32)> = None;
		for (slot, node) in self.nodes[..self.high_water].iter().enumerate() {
			if node.used && cheapest.is_none_or(|(_, cost)| node.cost < cost) {
				cheapest = Some((slot, node.cost));
			}
		}
		cheapest.map(|(slot, _)| slot)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Node at `(x, 0, 0)` with total cost `cost`
	fn node(x: i32, cost: i32) -> PathNode {
		PathNode::new(x, 0, 0, Direction::East, cost, 0, None)
	}

	#[test]
	fn insert_takes_first_free_slot() {
		let mut pool = NodePool::new(4);
		assert_eq!(Some(0), pool.insert(node(0, 1)));
		assert_eq!(Some(1), pool.insert(node(1, 1)));
		assert_eq!(Some(2), pool.insert(node(2, 1)));
		pool.release(1);
		assert_eq!(Some(1), pool.insert(node(3, 1)));
		assert_eq!(3, pool.get_active_count());
		assert_eq!(3, pool.get_high_water());
	}
	#[test]
	fn full_pool_refuses() {
		let mut pool = NodePool::new(2);
		pool.insert(node(0, 1));
		pool.insert(node(1, 1));
		assert_eq!(None, pool.insert(node(2, 1)));
		assert_eq!(2, pool.get_active_count());
	}
	#[test]
	fn find_ignores_released() {
		let mut pool = NodePool::new(4);
		let slot = pool.insert(node(5, 1)).unwrap();
		assert_eq!(Some(slot), pool.find(5, 0, 0));
		assert_eq!(None, pool.find(5, 0, 1));
		let released = pool.release(slot).unwrap();
		assert_eq!(5, released.x);
		assert_eq!(None, pool.find(5, 0, 0));
		assert_eq!(None, pool.get(slot));
		assert_eq!(None, pool.release(slot));
	}
	#[test]
	fn cheapest_prefers_lowest_slot_on_ties() {
		let mut pool = NodePool::new(8);
		pool.insert(node(0, 7));
		pool.insert(node(1, 3));
		pool.insert(node(2, 3));
		pool.insert(node(3, 9));
		assert_eq!(Some(1), pool.cheapest());
		pool.release(1);
		assert_eq!(Some(2), pool.cheapest());
	}
	#[test]
	fn cheapest_of_empty_pool() {
		let pool = NodePool::new(8);
		assert_eq!(None, pool.cheapest());
	}
	#[test]
	fn reset_frees_everything() {
		let mut pool = NodePool::new(8);
		for x in 0..6 {
			pool.insert(node(x, x));
		}
		pool.reset();
		assert_eq!(0, pool.get_active_count());
		assert_eq!(0, pool.get_high_water());
		assert_eq!(None, pool.find(3, 0, 0));
		assert_eq!(None, pool.get(3));
		assert_eq!(Some(0), pool.insert(node(9, 0)));
		assert_eq!(8, pool.get_capacity());
	}
	#[test]
	fn node_costs() {
		let n = PathNode::new(1, 2, 3, Direction::South, 4, 6, Some(0));
		assert_eq!(10, n.cost);
		assert!(n.used);
		assert!(n.is_at(1, 2, 3));
	}
}
