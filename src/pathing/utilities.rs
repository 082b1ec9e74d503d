//! Useful structures and constants shared by the collision resolver, the step
//! validator and the search engine
//!

use bevy::prelude::Reflect;

/// Capacity of each [crate::prelude::NodePool], also the hard ceiling of any node budget
pub const PATHFINDER_MAX_NODES: usize = 10000;
/// The largest vertical distance a mover can climb or drop in a single step
pub const DEFAULT_BLOCK_HEIGHT: i32 = 16;
/// Height of the collision column a standing character occupies
pub const DEFAULT_CHARACTER_HEIGHT: i32 = 16;
/// Lowest representable Z, doubles as the "no landing found" marker
pub const MIN_Z: i32 = -128;
/// Z of the synthetic ceiling object appended to every sorted object stack
pub const CEILING_Z: i32 = 128;
/// Headroom added to the top of a reachable Z range
pub const Z_RANGE_HEADROOM: i32 = 2;
/// A flying mover snaps onto a no-diagonal object whose average Z is within this distance
pub const FLYING_SNAP_TOLERANCE: i32 = 25;

/// The 8 compass directions a mover can face or step in.
///
/// The discriminant is the wire index of the direction, North is `0` and the
/// values increase clockwise so that odd indices are the diagonals.
///
/// ```text
///  NW(7)  N(0)  NE(1)
///      \   |   /
///  W(6) -  +  - E(2)
///      /   |   \
///  SW(5)  S(4)  SE(3)
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Reflect)]
pub enum Direction {
	#[default]
	North = 0,
	NorthEast = 1,
	East = 2,
	SouthEast = 3,
	South = 4,
	SouthWest = 5,
	West = 6,
	NorthWest = 7,
}

impl Direction {
	/// Every direction in index order
	pub const ALL: [Direction; 8] = [
		Direction::North,
		Direction::NorthEast,
		Direction::East,
		Direction::SouthEast,
		Direction::South,
		Direction::SouthWest,
		Direction::West,
		Direction::NorthWest,
	];
	/// Create a [Direction] from an index, only the lowest 3 bits are considered
	pub fn from_index(index: u8) -> Self {
		Direction::ALL[(index & 7) as usize]
	}
	/// Get the wire index of the direction
	pub fn get_index(&self) -> u8 {
		*self as u8
	}
	/// Get the `(x, y)` tile offset of a single step in this direction. `y` grows southwards
	pub fn get_offset(&self) -> (i32, i32) {
		match self {
			Direction::North => (0, -1),
			Direction::NorthEast => (1, -1),
			Direction::East => (1, 0),
			Direction::SouthEast => (1, 1),
			Direction::South => (0, 1),
			Direction::SouthWest => (-1, 1),
			Direction::West => (-1, 0),
			Direction::NorthWest => (-1, -1),
		}
	}
	/// Returns the opposite [Direction]
	pub fn inverse(&self) -> Direction {
		Direction::from_index(self.get_index() ^ 4)
	}
	/// Rotate by a number of eighth turns, positive is clockwise
	pub fn rotate(&self, eighths: i8) -> Direction {
		let index = (self.get_index() as i16 + eighths as i16).rem_euclid(8);
		Direction::from_index(index as u8)
	}
	/// Whether the direction is one of the four diagonals
	pub fn is_diagonal(&self) -> bool {
		self.get_index() % 2 != 0
	}
	/// Apply one step in this direction to a tile coordinate, saturating at the edge of
	/// the `i32` range
	pub fn step_from(&self, x: i32, y: i32) -> (i32, i32) {
		let (dx, dy) = self.get_offset();
		(x.saturating_add(dx), y.saturating_add(dy))
	}
}

/// Distance metric of 8-directional movement where a diagonal step costs the same as an orthogonal one
pub fn chebyshev_distance(source: (i32, i32), target: (i32, i32)) -> i32 {
	let distance = target.0.abs_diff(source.0).max(target.1.abs_diff(source.1));
	i32::try_from(distance).unwrap_or(i32::MAX)
}
