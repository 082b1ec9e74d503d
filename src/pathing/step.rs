//! Single tile movement validation, the edge expansion of the search and the re-check
//! made before every step of a walk
//!

use crate::prelude::*;

/// Where a legal step ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
	/// Direction actually taken, may differ from the one asked for when a diagonal
	/// had to slide onto an orthogonal
	pub direction: Direction,
	/// Destination column
	pub x: i32,
	/// Destination row
	pub y: i32,
	/// Landing height on the destination
	pub z: i32,
}

/// Offsets that turn a diagonal into its two orthogonal neighbours
const ORTHOGONAL_ROTATIONS: [i8; 2] = [1, -1];

/// Attempt a single step from `(x, y, z)` in `direction`.
///
/// A diagonal is only legal if the destination and both orthogonal tiles flanking the
/// corner can be landed on, this stops a mover squeezing between two solid corners. When
/// the diagonal is refused the step slides onto whichever orthogonal neighbour is open,
/// clockwise first
pub fn try_step(
	resolver: &mut CollisionResolver,
	x: i32,
	y: i32,
	z: i32,
	direction: Direction,
) -> Option<StepOutcome> {
	let landing = step_onto(resolver, x, y, z, direction);
	if !direction.is_diagonal() {
		return landing;
	}
	if landing.is_some() {
		let corner_clear = ORTHOGONAL_ROTATIONS.iter().all(|eighths| {
			step_onto(resolver, x, y, z, direction.rotate(*eighths)).is_some()
		});
		if corner_clear {
			return landing;
		}
	}
	ORTHOGONAL_ROTATIONS
		.iter()
		.find_map(|eighths| step_onto(resolver, x, y, z, direction.rotate(*eighths)))
}

/// Land on the neighbour of `(x, y)` in `direction`
fn step_onto(
	resolver: &mut CollisionResolver,
	x: i32,
	y: i32,
	z: i32,
	direction: Direction,
) -> Option<StepOutcome> {
	let (new_x, new_y) = direction.step_from(x, y);
	resolver
		.calculate_landing_z(new_x, new_y, z, direction)
		.map(|new_z| StepOutcome {
			direction,
			x: new_x,
			y: new_y,
			z: new_z,
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Context of an ordinary walker
	fn walker() -> StepContext {
		StepContext {
			ignore_characters: true,
			..Default::default()
		}
	}

	#[test]
	fn orthogonal_step() {
		let map = TileMap::open_grid(3, 3, 0);
		let mut resolver = CollisionResolver::new(&map, walker());
		let result = try_step(&mut resolver, 1, 1, 0, Direction::South);
		let actual = Some(StepOutcome {
			direction: Direction::South,
			x: 1,
			y: 2,
			z: 0,
		});
		assert_eq!(actual, result);
	}
	#[test]
	fn diagonal_step() {
		let map = TileMap::open_grid(3, 3, 0);
		let mut resolver = CollisionResolver::new(&map, walker());
		let result = try_step(&mut resolver, 0, 0, 0, Direction::SouthEast);
		let actual = Some(StepOutcome {
			direction: Direction::SouthEast,
			x: 1,
			y: 1,
			z: 0,
		});
		assert_eq!(actual, result);
	}
	#[test]
	fn corner_cut_rejected() {
		let mut map = TileMap::open_grid(3, 3, 0);
		// flanks of (0, 0) -> (1, 1)
		map.set_land(1, 0, LandTile::impassable(0));
		map.set_land(0, 1, LandTile::impassable(0));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(None, try_step(&mut resolver, 0, 0, 0, Direction::SouthEast));
	}
	#[test]
	fn half_blocked_corner_slides() {
		let mut map = TileMap::open_grid(3, 3, 0);
		// east flank blocked, south flank open
		map.set_land(1, 0, LandTile::impassable(0));
		let mut resolver = CollisionResolver::new(&map, walker());
		let result = try_step(&mut resolver, 0, 0, 0, Direction::SouthEast);
		let actual = Some(StepOutcome {
			direction: Direction::South,
			x: 0,
			y: 1,
			z: 0,
		});
		assert_eq!(actual, result);
	}
	#[test]
	fn blocked_diagonal_slides_clockwise_first() {
		let mut map = TileMap::open_grid(3, 3, 0);
		map.set_land(1, 1, LandTile::impassable(0));
		let mut resolver = CollisionResolver::new(&map, walker());
		// south east rotated clockwise is south
		let result = try_step(&mut resolver, 0, 0, 0, Direction::SouthEast);
		assert_eq!(Some(Direction::South), result.map(|s| s.direction));
	}
	#[test]
	fn off_map_rejected() {
		let map = TileMap::open_grid(3, 3, 0);
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(None, try_step(&mut resolver, 0, 0, 0, Direction::West));
	}
	#[test]
	fn step_up_stairs() {
		let mut map = TileMap::open_grid(3, 3, 0);
		map.push_object(2, 1, TileObject::Static(StaticTile::stairs(0, 10)));
		let mut resolver = CollisionResolver::new(&map, walker());
		let result = try_step(&mut resolver, 1, 1, 0, Direction::East);
		assert_eq!(Some(5), result.map(|s| s.z));
	}
}
