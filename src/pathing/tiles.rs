//! The world as the pathfinder sees it. A map store implements [TileQuery] to hand out the
//! raw stack of objects occupying a tile, the pathfinder then derives its own collision
//! data from them.
//!
//! A tile is a column of objects, the land at the bottom and statics, items and mobiles
//! stacked above it at various heights:
//!
//! ```text
//!   z
//!   |      ___________  <- roof (static, surface)
//!   |
//!   |        [mob]      <- mobile (16 high)
//!   |     __/     \__   <- bridge/stairs (static, bridge)
//!   |____/___________\  <- land (corner heights may differ, "stretched")
//! ```
//!

use bevy::prelude::Reflect;

use crate::prelude::*;

/// Raw tile-data properties of a land or static graphic.
///
/// Each bit is a property read from the client's tile-data tables, the collision
/// resolver turns these into [CollisionFlags] for a given [StepState]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileDataFlags(u16);

impl TileDataFlags {
	/// Nothing can stand in or walk through the object
	pub const IMPASSABLE: TileDataFlags = TileDataFlags(0x0001);
	/// The top of the object can be stood upon
	pub const SURFACE: TileDataFlags = TileDataFlags(0x0002);
	/// Stairs, ramps and bridges, the walkable height is half way up the object
	pub const BRIDGE: TileDataFlags = TileDataFlags(0x0004);
	/// Water
	pub const WET: TileDataFlags = TileDataFlags(0x0008);
	/// Flying movers cannot cut diagonally across the object
	pub const NO_DIAGONAL: TileDataFlags = TileDataFlags(0x0010);
	/// A door
	pub const DOOR: TileDataFlags = TileDataFlags(0x0020);
	/// No properties
	pub const fn empty() -> Self {
		TileDataFlags(0)
	}
	/// Whether every bit of `flags` is set
	pub fn contains(&self, flags: TileDataFlags) -> bool {
		self.0 & flags.0 == flags.0
	}
	/// Set the bits of `flags`
	pub fn insert(&mut self, flags: TileDataFlags) {
		self.0 |= flags.0;
	}
	/// Builder style variant of [TileDataFlags::insert]
	pub fn with(mut self, flags: TileDataFlags) -> Self {
		self.insert(flags);
		self
	}
}

impl std::ops::BitOr for TileDataFlags {
	type Output = TileDataFlags;
	fn bitor(self, rhs: Self) -> Self::Output {
		TileDataFlags(self.0 | rhs.0)
	}
}

/// Land (terrain) at the bottom of a tile. Its four corners may sit at different
/// heights in which case the tile is drawn stretched and its walkable height depends
/// on the direction it is entered from
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandTile {
	/// Art id, a handful of ids are void filler that never collide
	graphic: u16,
	/// Corner heights ordered top, right, bottom, left
	corners: [i32; 4],
	/// Tile-data properties
	flags: TileDataFlags,
}

impl LandTile {
	/// Create a flat [LandTile] at height `z`
	pub fn flat(graphic: u16, z: i32, flags: TileDataFlags) -> Self {
		LandTile {
			graphic,
			corners: [z; 4],
			flags,
		}
	}
	/// Create a [LandTile] from its corner heights, ordered top, right, bottom, left
	pub fn stretched(graphic: u16, corners: [i32; 4], flags: TileDataFlags) -> Self {
		LandTile {
			graphic,
			corners,
			flags,
		}
	}
	/// A walkable flat tile of grass at height `z`
	pub fn walkable(z: i32) -> Self {
		LandTile::flat(0x0003, z, TileDataFlags::empty())
	}
	/// An impassable flat tile of rock at height `z`
	pub fn impassable(z: i32) -> Self {
		LandTile::flat(0x00DC, z, TileDataFlags::IMPASSABLE)
	}
	/// Get the art id
	pub fn get_graphic(&self) -> u16 {
		self.graphic
	}
	/// Get the tile-data properties
	pub fn get_flags(&self) -> TileDataFlags {
		self.flags
	}
	/// Height of the top corner, the nominal Z of the tile
	pub fn get_z(&self) -> i32 {
		self.corners[0]
	}
	/// Lowest corner
	pub fn get_min_z(&self) -> i32 {
		self.corners.iter().copied().min().unwrap_or(self.corners[0])
	}
	/// Average height, taken along whichever diagonal of the tile is flatter
	pub fn get_average_z(&self) -> i32 {
		let [top, right, bottom, left] = self.corners;
		if (top - bottom).abs() <= (left - right).abs() {
			(top + bottom) >> 1
		} else {
			(left + right) >> 1
		}
	}
	/// Whether the corners are not all at the same height
	pub fn is_stretched(&self) -> bool {
		self.corners.iter().any(|z| *z != self.corners[0])
	}
	/// Void land is filler art drawn where there is no terrain, it never collides
	pub fn is_void(&self) -> bool {
		let g = self.graphic;
		g == 0x0002 || (0x01AE..=0x01B5).contains(&g) || g == 0x01DB
	}
	/// The height of the tile as seen by a mover travelling in `direction`.
	///
	/// Cardinal directions (even indices) take the mean of the two corners of the edge
	/// being crossed, diagonals take the single corner
	pub fn get_average_z_for(&self, direction: Direction) -> i32 {
		let d = direction.get_index() as usize;
		let result = self.corners[((d >> 1) + 1) & 3];
		if d & 1 != 0 {
			result
		} else {
			(result + self.corners[d >> 1]) >> 1
		}
	}
}

/// Whether a static object is part of the map or a world item that may be moved, opened or locked
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StaticKind {
	/// Fixed map art, walls, floors, trees
	#[default]
	Fixture,
	/// A dynamic world item such as a door or a crate
	Item {
		/// Item weight in stones, light items are no obstacle to ghosts
		weight: u8,
		/// Locked items stay solid for game masters
		locked: bool,
	},
}

/// Any non-land object occupying a tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTile {
	/// Art id
	graphic: u16,
	/// Base height
	z: i32,
	/// Height of the object from its base
	height: i32,
	/// Tile-data properties
	flags: TileDataFlags,
	/// Fixture or item
	kind: StaticKind,
}

impl StaticTile {
	/// Create a new fixture [StaticTile]
	pub fn new(graphic: u16, z: i32, height: i32, flags: TileDataFlags) -> Self {
		StaticTile {
			graphic,
			z,
			height,
			flags,
			kind: StaticKind::Fixture,
		}
	}
	/// Create a new world item
	pub fn item(
		graphic: u16,
		z: i32,
		height: i32,
		flags: TileDataFlags,
		weight: u8,
		locked: bool,
	) -> Self {
		StaticTile {
			graphic,
			z,
			height,
			flags,
			kind: StaticKind::Item { weight, locked },
		}
	}
	/// A solid wall section of `height` standing at `z`
	pub fn wall(z: i32, height: i32) -> Self {
		StaticTile::new(0x0080, z, height, TileDataFlags::IMPASSABLE)
	}
	/// A floor or table top of `height` at `z` that can be stood upon
	pub fn surface(z: i32, height: i32) -> Self {
		StaticTile::new(0x0495, z, height, TileDataFlags::SURFACE)
	}
	/// A stair or ramp of `height` at `z`
	pub fn stairs(z: i32, height: i32) -> Self {
		StaticTile::new(0x0751, z, height, TileDataFlags::SURFACE | TileDataFlags::BRIDGE)
	}
	/// Get the art id
	pub fn get_graphic(&self) -> u16 {
		self.graphic
	}
	/// Get the base height
	pub fn get_z(&self) -> i32 {
		self.z
	}
	/// Get the height of the object
	pub fn get_height(&self) -> i32 {
		self.height
	}
	/// Get the tile-data properties
	pub fn get_flags(&self) -> TileDataFlags {
		self.flags
	}
	/// Get whether this is a fixture or an item
	pub fn get_kind(&self) -> StaticKind {
		self.kind
	}
}

/// A character standing on a tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileTile {
	/// Height the character stands at
	pub z: i32,
	/// Dead characters never block
	pub dead: bool,
	/// Characters flagged to ignore collisions never block either
	pub ignores_characters: bool,
}

impl MobileTile {
	/// A living character at `z`
	pub fn new(z: i32) -> Self {
		MobileTile {
			z,
			dead: false,
			ignores_characters: false,
		}
	}
}

/// One entry of a tile's object stack
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileObject {
	/// Terrain
	Land(LandTile),
	/// Map art and world items
	Static(StaticTile),
	/// Characters
	Mobile(MobileTile),
}

/// Read-only access to the objects of a dynamically loaded map
pub trait TileQuery {
	/// Append the objects stacked on tile `(x, y)` of map `map_index` to `out`, ordered
	/// bottom to top. Returns `false` if the tile is not loaded or lies off the map
	fn collect_tile_objects(&self, map_index: u8, x: i32, y: i32, out: &mut Vec<TileObject>)
		-> bool;
}

/// How the controlled entity is moving, this decides which collision rules apply
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum StepState {
	/// On foot or on an ordinary mount
	#[default]
	Normal,
	/// A ghost or a game master, passes through doors and light items
	DeadOrGm,
	/// Riding an amphibious mount, only water is walkable
	OnSeaHorse,
	/// A flying gargoyle
	Flying,
}

impl StepState {
	/// Classify the entity's condition. Death and GM status take precedence over flight,
	/// flight over the mount
	pub fn derive(is_dead: bool, is_gm: bool, is_flying: bool, on_sea_horse: bool) -> Self {
		if is_dead || is_gm {
			StepState::DeadOrGm
		} else if is_flying {
			StepState::Flying
		} else if on_sea_horse {
			StepState::OnSeaHorse
		} else {
			StepState::Normal
		}
	}
}

/// Snapshot of the entity being walked, taken at the end of its queued steps
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntityState {
	/// Tile column
	pub x: i32,
	/// Tile row
	pub y: i32,
	/// Height
	pub z: i32,
	/// Direction the entity faces
	pub facing: Direction,
	/// Map the entity is on
	pub map_index: u8,
	/// Movement mode
	pub step_state: StepState,
	/// Game master body
	pub is_gm: bool,
	/// Paralyzed entities cannot start a walk
	pub paralyzed: bool,
	/// Other characters do not block this entity (full stamina, off the main map, or
	/// an explicit client toggle)
	pub ignores_characters: bool,
}
