//! An in-memory map store implementing [TileQuery].
//!
//! A [TileMap] is either bounded, a `width` by `height` grid whose origin is `(0, 0)`,
//! or an unbounded plane. Tiles that were never edited fall back to a default land tile
//! if one is set, which keeps large open maps cheap to describe
//!

use std::collections::BTreeMap;

use crate::prelude::*;

/// Object stacks of a single map
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TileMap {
	/// Map this store answers for, queries for other maps fail
	map_index: u8,
	/// Width and height of a bounded map
	bounds: Option<(i32, i32)>,
	/// Land of any tile without an explicit stack
	default_land: Option<LandTile>,
	/// Explicit stacks, bottom to top
	stacks: BTreeMap<(i32, i32), Vec<TileObject>>,
}

impl TileMap {
	/// Create a bounded [TileMap] with no objects at all
	pub fn new(map_index: u8, width: i32, height: i32) -> Self {
		TileMap {
			map_index,
			bounds: Some((width, height)),
			default_land: None,
			stacks: BTreeMap::new(),
		}
	}
	/// A bounded map on map `0` covered in walkable land at height `z`
	pub fn open_grid(width: i32, height: i32, z: i32) -> Self {
		TileMap {
			default_land: Some(LandTile::walkable(z)),
			..TileMap::new(0, width, height)
		}
	}
	/// An unbounded map on map `0` covered in walkable land at height `z`
	pub fn plane(z: i32) -> Self {
		TileMap {
			map_index: 0,
			bounds: None,
			default_land: Some(LandTile::walkable(z)),
			stacks: BTreeMap::new(),
		}
	}
	/// Build a bounded map on map `0` from rows of characters, `.` is walkable land,
	/// `#` impassable land and anything else an empty tile. Every land tile sits at `z`
	///
	/// ```text
	/// ".#.."
	/// ".#.#"
	/// "...."
	/// ```
	pub fn from_rows(rows: &[&str], z: i32) -> Self {
		let height = rows.len() as i32;
		let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
		let mut map = TileMap::new(0, width, height);
		for (y, row) in rows.iter().enumerate() {
			for (x, c) in row.chars().enumerate() {
				let (x, y) = (x as i32, y as i32);
				match c {
					'.' => map.set_land(x, y, LandTile::walkable(z)),
					'#' => map.set_land(x, y, LandTile::impassable(z)),
					_ => map.clear_tile(x, y),
				}
			}
		}
		map
	}
	/// Get the map index
	pub fn get_map_index(&self) -> u8 {
		self.map_index
	}
	/// Set the map index
	pub fn set_map_index(&mut self, map_index: u8) {
		self.map_index = map_index;
	}
	/// Get the width and height of a bounded map
	pub fn get_bounds(&self) -> Option<(i32, i32)> {
		self.bounds
	}
	/// Whether `(x, y)` lies on the map
	pub fn contains(&self, x: i32, y: i32) -> bool {
		match self.bounds {
			Some((width, height)) => x >= 0 && y >= 0 && x < width && y < height,
			None => true,
		}
	}
	/// Get the stack of `(x, y)` as a query would see it
	pub fn get_stack(&self, x: i32, y: i32) -> Vec<TileObject> {
		let mut stack = Vec::new();
		self.collect_tile_objects(self.map_index, x, y, &mut stack);
		stack
	}
	/// Explicit stack of `(x, y)`, seeded with the default land
	fn stack_mut(&mut self, x: i32, y: i32) -> &mut Vec<TileObject> {
		let default_land = self.default_land;
		self.stacks.entry((x, y)).or_insert_with(|| {
			default_land
				.map(|land| vec![TileObject::Land(land)])
				.unwrap_or_default()
		})
	}
	/// Replace the land of `(x, y)`, or place it at the bottom of the stack if there is none
	pub fn set_land(&mut self, x: i32, y: i32, land: LandTile) {
		let stack = self.stack_mut(x, y);
		match stack.iter_mut().find(|o| matches!(o, TileObject::Land(_))) {
			Some(existing) => *existing = TileObject::Land(land),
			None => stack.insert(0, TileObject::Land(land)),
		}
	}
	/// Place an object on top of the stack of `(x, y)`
	pub fn push_object(&mut self, x: i32, y: i32, object: TileObject) {
		self.stack_mut(x, y).push(object);
	}
	/// Remove everything from `(x, y)`, including the default land
	pub fn clear_tile(&mut self, x: i32, y: i32) {
		self.stacks.insert((x, y), Vec::new());
	}
	/// Drop the edits of `(x, y)`, returning it to the default land
	pub fn reset_tile(&mut self, x: i32, y: i32) {
		self.stacks.remove(&(x, y));
	}
}

impl TileQuery for TileMap {
	fn collect_tile_objects(
		&self,
		map_index: u8,
		x: i32,
		y: i32,
		out: &mut Vec<TileObject>,
	) -> bool {
		if map_index != self.map_index || !self.contains(x, y) {
			return false;
		}
		match self.stacks.get(&(x, y)) {
			Some(stack) => out.extend_from_slice(stack),
			None => {
				if let Some(land) = self.default_land {
					out.push(TileObject::Land(land));
				}
			}
		}
		true
	}
}
