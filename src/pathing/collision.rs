//! Vertical collision. Every tile is a stack of objects at various heights, moving onto a
//! tile means finding a height on that stack the mover can land on without climbing or
//! dropping more than [DEFAULT_BLOCK_HEIGHT] and without its head hitting whatever sits
//! above.
//!
//! Resolution happens in two passes:
//!
//! * The tile the mover is coming from is folded into a reachable `(min_z, max_z)`
//!   envelope, see [CollisionResolver::compute_z_range]
//! * The destination stack is sorted by height, capped by a ceiling sentinel and scanned
//!   for the standable surface closest to the mover's current height, see
//!   [CollisionResolver::calculate_landing_z]
//!

use crate::prelude::*;

/// Collision category of a [PathObject], derived from raw [TileDataFlags] and the active [StepState]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
	/// Blocks the column it occupies and raises the floor to its top
	pub const IMPASSABLE_OR_SURFACE: CollisionFlags = CollisionFlags(0x01);
	/// Can be stood upon
	pub const SURFACE: CollisionFlags = CollisionFlags(0x02);
	/// Can be walked up onto from below, stairs and ramps
	pub const BRIDGE: CollisionFlags = CollisionFlags(0x04);
	/// A flying mover snaps onto it
	pub const NO_DIAGONAL: CollisionFlags = CollisionFlags(0x08);
	/// No flags
	pub const fn empty() -> Self {
		CollisionFlags(0)
	}
	/// Whether no flag is set
	pub fn is_empty(&self) -> bool {
		self.0 == 0
	}
	/// Whether every bit of `flags` is set
	pub fn contains(&self, flags: CollisionFlags) -> bool {
		self.0 & flags.0 == flags.0
	}
	/// Whether any bit of `flags` is set
	pub fn intersects(&self, flags: CollisionFlags) -> bool {
		self.0 & flags.0 != 0
	}
	/// Set the bits of `flags`
	pub fn insert(&mut self, flags: CollisionFlags) {
		self.0 |= flags.0;
	}
	/// Clear the bits of `flags`
	pub fn remove(&mut self, flags: CollisionFlags) {
		self.0 &= !flags.0;
	}
}

impl std::ops::BitOr for CollisionFlags {
	type Output = CollisionFlags;
	fn bitor(self, rhs: Self) -> Self::Output {
		CollisionFlags(self.0 | rhs.0)
	}
}

/// What a [PathObject] was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathObjectSource {
	/// Land, kept so stretched tiles can be re-averaged for a direction
	Land(LandTile),
	/// A static or item
	Static,
	/// A character
	Mobile,
	/// The synthetic cap of a sorted stack
	Ceiling,
}

/// An object of a tile stack reduced to what collision cares about. Built, sorted and
/// consumed within a single resolver call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathObject {
	/// Collision category
	pub flags: CollisionFlags,
	/// Base height
	pub z: i32,
	/// Height a mover stands at on top of the object
	pub average_z: i32,
	/// Height of the object
	pub height: i32,
	/// Origin of the object
	pub source: PathObjectSource,
}

impl PathObject {
	/// The solid cap placed above every sorted stack so the space under the highest real
	/// object is also considered
	pub fn ceiling() -> Self {
		PathObject {
			flags: CollisionFlags::IMPASSABLE_OR_SURFACE,
			z: CEILING_Z,
			average_z: CEILING_Z,
			height: CEILING_Z,
			source: PathObjectSource::Ceiling,
		}
	}
}

/// Everything about the mover that changes collision rules, computed once per search
/// and passed through every query
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepContext {
	/// Map the mover is on
	pub map_index: u8,
	/// Movement mode
	pub step_state: StepState,
	/// Other characters do not block
	pub ignore_characters: bool,
	/// Game masters also pass unlocked items when in [StepState::DeadOrGm]
	pub is_gm: bool,
	/// Doors open as they are walked into and never block
	pub smooth_doors: bool,
}

impl StepContext {
	/// Build the context from a snapshot of the entity and the active settings
	pub fn new(entity: &EntityState, settings: &AutowalkSettings) -> Self {
		StepContext {
			map_index: entity.map_index,
			step_state: entity.step_state,
			ignore_characters: settings.ignore_stamina_check
				|| entity.step_state == StepState::DeadOrGm
				|| entity.ignores_characters,
			is_gm: entity.is_gm,
			smooth_doors: settings.smooth_doors,
		}
	}
}

/// Derive the [PathObject] of a raw tile object, `None` if it does not take part in collision
pub fn classify_object(object: &TileObject, context: &StepContext) -> Option<PathObject> {
	match object {
		TileObject::Land(land) => classify_land(land, context),
		TileObject::Static(item) => classify_static(item, context),
		TileObject::Mobile(mobile) => {
			if context.ignore_characters || mobile.dead || mobile.ignores_characters {
				None
			} else {
				Some(PathObject {
					flags: CollisionFlags::IMPASSABLE_OR_SURFACE,
					z: mobile.z,
					average_z: mobile.z + DEFAULT_CHARACTER_HEIGHT,
					height: DEFAULT_CHARACTER_HEIGHT,
					source: PathObjectSource::Mobile,
				})
			}
		}
	}
}

/// Land is always solid, it is walkable on top unless impassable (or dry when riding a sea horse)
fn classify_land(land: &LandTile, context: &StepContext) -> Option<PathObject> {
	if land.is_void() {
		return None;
	}
	let tile_flags = land.get_flags();
	let walkable = CollisionFlags::IMPASSABLE_OR_SURFACE
		| CollisionFlags::SURFACE
		| CollisionFlags::BRIDGE;
	let mut flags = CollisionFlags::IMPASSABLE_OR_SURFACE;
	if context.step_state == StepState::OnSeaHorse {
		if tile_flags.contains(TileDataFlags::WET) {
			flags = walkable;
		}
	} else {
		if !tile_flags.contains(TileDataFlags::IMPASSABLE) {
			flags = walkable;
		}
		if context.step_state == StepState::Flying
			&& tile_flags.contains(TileDataFlags::NO_DIAGONAL)
		{
			flags.insert(CollisionFlags::NO_DIAGONAL);
		}
	}
	let min_z = land.get_min_z();
	let average_z = land.get_average_z();
	Some(PathObject {
		flags,
		z: min_z,
		average_z,
		height: average_z - min_z,
		source: PathObjectSource::Land(*land),
	})
}

/// Statics and items
fn classify_static(item: &StaticTile, context: &StepContext) -> Option<PathObject> {
	let tile_flags = item.get_flags();
	let impassable = tile_flags.contains(TileDataFlags::IMPASSABLE);
	let surface = tile_flags.contains(TileDataFlags::SURFACE);
	let bridge = tile_flags.contains(TileDataFlags::BRIDGE);
	let mut flags = CollisionFlags::empty();
	if context.step_state == StepState::OnSeaHorse {
		if tile_flags.contains(TileDataFlags::WET) {
			flags = CollisionFlags::SURFACE | CollisionFlags::BRIDGE;
		}
	} else {
		if impassable || surface {
			flags.insert(CollisionFlags::IMPASSABLE_OR_SURFACE);
		}
		if !impassable {
			if surface {
				flags.insert(CollisionFlags::SURFACE);
			}
			if bridge {
				flags.insert(CollisionFlags::BRIDGE);
			}
		}
		if is_passable_for(item, context) {
			flags.remove(CollisionFlags::IMPASSABLE_OR_SURFACE);
		}
		if context.step_state == StepState::Flying
			&& tile_flags.contains(TileDataFlags::NO_DIAGONAL)
		{
			flags.insert(CollisionFlags::NO_DIAGONAL);
		}
	}
	if flags.is_empty() {
		return None;
	}
	let mut stand_height = item.get_height();
	if bridge {
		stand_height /= 2;
	}
	Some(PathObject {
		flags,
		z: item.get_z(),
		average_z: item.get_z() + stand_height,
		height: item.get_height(),
		source: PathObjectSource::Static,
	})
}

/// Whether the blocking bit of a static should be dropped for this mover
fn is_passable_for(item: &StaticTile, context: &StepContext) -> bool {
	let graphic = item.get_graphic();
	let dead_or_gm = context.step_state == StepState::DeadOrGm;
	let is_door = item.get_flags().contains(TileDataFlags::DOOR);
	let item_passable = match item.get_kind() {
		StaticKind::Item { weight, locked } => {
			if dead_or_gm && (is_door || weight <= 0x5A || (context.is_gm && !locked)) {
				true
			} else if context.smooth_doors && is_door {
				true
			} else {
				// magic fields
				(0x3946..=0x3964).contains(&graphic) || graphic == 0x0082
			}
		}
		StaticKind::Fixture => false,
	};
	item_passable || (dead_or_gm && is_ghost_passable(graphic))
}

/// Art that ghosts and game masters walk through (moongates, spirit barriers)
fn is_ghost_passable(graphic: u16) -> bool {
	matches!(graphic, 0x0692 | 0x06F5 | 0x06F6 | 0x0846 | 0x0873)
}

/// Resolves landing heights against a [TileQuery] for one mover.
///
/// Holds scratch buffers that are reused across calls so a search does not allocate
/// per expanded node once the buffers have grown to the largest stack seen
pub struct CollisionResolver<'a> {
	/// The map
	query: &'a dyn TileQuery,
	/// Mover specific rules
	context: StepContext,
	/// Raw objects of the tile being examined
	tiles: Vec<TileObject>,
	/// Collision objects of the tile being examined
	objects: Vec<PathObject>,
}

impl<'a> CollisionResolver<'a> {
	/// Create a new instance of [CollisionResolver]
	pub fn new(query: &'a dyn TileQuery, context: StepContext) -> Self {
		CollisionResolver {
			query,
			context,
			tiles: Vec::with_capacity(16),
			objects: Vec::with_capacity(16),
		}
	}
	/// Get the mover context
	pub fn get_context(&self) -> &StepContext {
		&self.context
	}
	/// Rebuild `objects` from tile `(x, y)`, returns whether anything collides there
	fn create_item_list(&mut self, x: i32, y: i32) -> bool {
		self.tiles.clear();
		self.objects.clear();
		if !self
			.query
			.collect_tile_objects(self.context.map_index, x, y, &mut self.tiles)
		{
			return false;
		}
		for tile_object in self.tiles.iter() {
			if let Some(object) = classify_object(tile_object, &self.context) {
				self.objects.push(object);
			}
		}
		!self.objects.is_empty()
	}
	/// Fold the tile the mover comes from into a reachable `(min_z, max_z)` envelope for
	/// a step in `direction` onto `(x, y)`.
	///
	/// If the tile behind holds nothing the envelope is `(MIN_Z, current_z)` without headroom
	pub fn compute_z_range(
		&mut self,
		x: i32,
		y: i32,
		current_z: i32,
		direction: Direction,
	) -> (i32, i32) {
		let mut min_z = MIN_Z;
		let mut max_z = current_z;
		let (behind_x, behind_y) = direction.inverse().step_from(x, y);
		if !self.create_item_list(behind_x, behind_y) {
			return (min_z, max_z);
		}
		for object in self.objects.iter() {
			let average_z = object.average_z;
			match object.source {
				PathObjectSource::Land(land) if average_z <= current_z && land.is_stretched() => {
					let directional_z = land.get_average_z_for(direction);
					min_z = min_z.max(directional_z);
					max_z = max_z.max(directional_z);
				}
				_ => {
					if object.flags.contains(CollisionFlags::IMPASSABLE_OR_SURFACE)
						&& average_z <= current_z
						&& min_z < average_z
					{
						min_z = average_z;
					}
					if object.flags.contains(CollisionFlags::BRIDGE) && current_z == average_z {
						max_z = max_z.max(object.z + object.height);
						min_z = min_z.min(object.z);
					}
				}
			}
		}
		(min_z, max_z + Z_RANGE_HEADROOM)
	}
	/// Find the height a mover at `z` lands at when stepping onto `(x, y)` in `direction`,
	/// `None` if there is no standable surface within climbing reach.
	///
	/// A candidate surface needs [DEFAULT_BLOCK_HEIGHT] of clearance beneath the next
	/// solid object above it. Among the candidates the one closest to `z` wins, equal
	/// distances keep the first one found
	pub fn calculate_landing_z(
		&mut self,
		x: i32,
		y: i32,
		z: i32,
		direction: Direction,
	) -> Option<i32> {
		let (mut min_z, max_z) = self.compute_z_range(x, y, z, direction);
		if !self.create_item_list(x, y) {
			return None;
		}
		self.objects.sort_by_key(|object| (object.z, object.height));
		self.objects.push(PathObject::ceiling());

		let z = z.max(min_z);
		let flying = self.context.step_state == StepState::Flying;
		let mut result_z = MIN_Z;
		let mut best_delta = i32::MAX;
		let mut current_z = MIN_Z;

		for (i, object) in self.objects.iter().enumerate() {
			if flying && object.flags.contains(CollisionFlags::NO_DIAGONAL) {
				let average_z = object.average_z;
				if (average_z - z).abs() <= FLYING_SNAP_TOLERANCE {
					result_z = if average_z != MIN_Z {
						average_z
					} else {
						current_z
					};
					break;
				}
			}
			if !object.flags.contains(CollisionFlags::IMPASSABLE_OR_SURFACE) {
				continue;
			}
			if object.z - min_z >= DEFAULT_BLOCK_HEIGHT {
				// look for the best surface underneath this object
				for below in self.objects[..i].iter().rev() {
					if !below
						.flags
						.intersects(CollisionFlags::SURFACE | CollisionFlags::BRIDGE)
					{
						continue;
					}
					let below_z = below.average_z;
					let reachable = (below_z <= max_z
						&& below.flags.contains(CollisionFlags::SURFACE))
						|| (below.flags.contains(CollisionFlags::BRIDGE) && below.z <= max_z);
					if below_z >= current_z
						&& object.z - below_z >= DEFAULT_BLOCK_HEIGHT
						&& reachable
					{
						let delta = (z - below_z).abs();
						if delta < best_delta {
							best_delta = delta;
							result_z = below_z;
						}
					}
				}
			}
			min_z = min_z.max(object.average_z);
			current_z = current_z.max(object.average_z);
		}
		(result_z != MIN_Z).then_some(result_z)
	}
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
	/// A 3x3 map of flat walkable land at z 0
	fn field() -> TileMap {
		TileMap::open_grid(3, 3, 0)
	}

	#[test]
	fn open_land_lands_at_ground() {
		let map = field();
		let mut resolver = CollisionResolver::new(&map, walker());
		let result = resolver.calculate_landing_z(1, 1, 0, Direction::East);
		assert_eq!(Some(0), result);
	}
	#[test]
	fn wall_on_land_blocks() {
		let mut map = field();
		map.push_object(1, 1, TileObject::Static(StaticTile::wall(0, 20)));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(None, resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn lone_impassable_object_blocks() {
		let mut map = field();
		map.clear_tile(1, 1);
		map.push_object(1, 1, TileObject::Static(StaticTile::wall(0, 20)));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(None, resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn empty_tile_blocks() {
		let mut map = field();
		map.clear_tile(1, 1);
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(None, resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn surface_out_of_reach_blocks() {
		let mut map = field();
		map.push_object(1, 1, TileObject::Static(StaticTile::surface(0, 20)));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(None, resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn stairs_are_climbed() {
		let mut map = field();
		map.push_object(1, 1, TileObject::Static(StaticTile::stairs(0, 10)));
		let mut resolver = CollisionResolver::new(&map, walker());
		// bridges are stood upon half way up
		assert_eq!(Some(5), resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn walks_under_a_roof() {
		let mut map = field();
		map.push_object(1, 1, TileObject::Static(StaticTile::surface(20, 0)));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(Some(0), resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn upper_floor_keeps_its_level() {
		let mut map = field();
		for x in 0..3 {
			for y in 0..3 {
				map.push_object(x, y, TileObject::Static(StaticTile::surface(20, 0)));
			}
		}
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(Some(20), resolver.calculate_landing_z(1, 1, 20, Direction::East));
		assert_eq!(Some(0), resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn z_range_of_flat_land() {
		let map = field();
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!((0, 2), resolver.compute_z_range(1, 1, 0, Direction::East));
	}
	#[test]
	fn z_range_off_map_has_no_headroom() {
		let map = field();
		let mut resolver = CollisionResolver::new(&map, walker());
		// tile behind (0, 1) heading east is (-1, 1)
		assert_eq!((MIN_Z, 0), resolver.compute_z_range(0, 1, 0, Direction::East));
	}
	#[test]
	fn z_range_standing_on_a_bridge() {
		let mut map = field();
		// mover comes from (0, 1) heading east
		map.push_object(0, 1, TileObject::Static(StaticTile::stairs(0, 10)));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!((0, 12), resolver.compute_z_range(1, 1, 5, Direction::East));
	}
	#[test]
	fn z_range_of_stretched_land() {
		let mut map = field();
		map.set_land(
			1,
			2,
			LandTile::stretched(3, [10, 6, 0, 2], TileDataFlags::empty()),
		);
		let mut resolver = CollisionResolver::new(&map, walker());
		// heading north onto (1, 1) from (1, 2), the land average is 4
		assert_eq!((8, 10), resolver.compute_z_range(1, 1, 4, Direction::North));
	}
	#[test]
	fn closest_surface_wins_when_flying() {
		let mut map = field();
		let ledge = StaticTile::new(
			0x0495,
			30,
			0,
			TileDataFlags::SURFACE | TileDataFlags::NO_DIAGONAL,
		);
		map.push_object(1, 1, TileObject::Static(ledge));
		let flying = StepContext {
			step_state: StepState::Flying,
			ignore_characters: true,
			..Default::default()
		};
		let mut resolver = CollisionResolver::new(&map, flying);
		assert_eq!(Some(30), resolver.calculate_landing_z(1, 1, 10, Direction::East));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(Some(0), resolver.calculate_landing_z(1, 1, 10, Direction::East));
	}
	#[test]
	fn mobiles_block_unless_ignored() {
		let mut map = field();
		map.push_object(1, 1, TileObject::Mobile(MobileTile::new(0)));
		let blocking = StepContext::default();
		let mut resolver = CollisionResolver::new(&map, blocking);
		assert_eq!(None, resolver.calculate_landing_z(1, 1, 0, Direction::East));
		let mut resolver = CollisionResolver::new(&map, walker());
		assert_eq!(Some(0), resolver.calculate_landing_z(1, 1, 0, Direction::East));
	}
	#[test]
	fn sea_horse_swims_only() {
		let sea_horse = StepContext {
			step_state: StepState::OnSeaHorse,
			..Default::default()
		};
		let dry = classify_object(&TileObject::Land(LandTile::walkable(0)), &sea_horse).unwrap();
		assert_eq!(CollisionFlags::IMPASSABLE_OR_SURFACE, dry.flags);
		let water = LandTile::flat(0x00A8, -5, TileDataFlags::WET | TileDataFlags::IMPASSABLE);
		let wet = classify_object(&TileObject::Land(water), &sea_horse).unwrap();
		assert!(wet.flags.contains(CollisionFlags::SURFACE | CollisionFlags::BRIDGE));
		// the same water is solid ground to anyone else
		let normal = classify_object(&TileObject::Land(water), &walker()).unwrap();
		assert_eq!(CollisionFlags::IMPASSABLE_OR_SURFACE, normal.flags);
	}
	#[test]
	fn ghosts_pass_doors_and_barriers() {
		let ghost = StepContext {
			step_state: StepState::DeadOrGm,
			ignore_characters: true,
			..Default::default()
		};
		let door = StaticTile::item(
			0x0675,
			0,
			20,
			TileDataFlags::IMPASSABLE | TileDataFlags::DOOR,
			0xFF,
			true,
		);
		// impassable without surface/bridge leaves no flags once the block is dropped
		assert_eq!(None, classify_object(&TileObject::Static(door), &ghost));
		assert!(classify_object(&TileObject::Static(door), &walker()).is_some());
		let barrier = StaticTile::new(0x0846, 0, 20, TileDataFlags::IMPASSABLE);
		assert_eq!(None, classify_object(&TileObject::Static(barrier), &ghost));
		assert!(classify_object(&TileObject::Static(barrier), &walker()).is_some());
	}
	#[test]
	fn smooth_doors_pass_doors() {
		let door = StaticTile::item(
			0x0675,
			0,
			20,
			TileDataFlags::IMPASSABLE | TileDataFlags::DOOR,
			0xFF,
			true,
		);
		let context = StepContext {
			smooth_doors: true,
			..walker()
		};
		assert_eq!(None, classify_object(&TileObject::Static(door), &context));
	}
	#[test]
	fn magic_fields_never_block() {
		let field = StaticTile::item(0x3950, 0, 20, TileDataFlags::IMPASSABLE, 0xFF, false);
		assert_eq!(None, classify_object(&TileObject::Static(field), &walker()));
		let field = StaticTile::item(0x0082, 0, 20, TileDataFlags::IMPASSABLE, 0xFF, true);
		assert_eq!(None, classify_object(&TileObject::Static(field), &walker()));
	}
	#[test]
	fn light_items_pass_for_ghosts() {
		let ghost = StepContext {
			step_state: StepState::DeadOrGm,
			..walker()
		};
		let crate_item = StaticTile::item(0x0E3C, 0, 10, TileDataFlags::IMPASSABLE, 0x10, true);
		assert_eq!(None, classify_object(&TileObject::Static(crate_item), &ghost));
		assert!(classify_object(&TileObject::Static(crate_item), &walker()).is_some());
		// the weight limit is inclusive
		let limit = StaticTile::item(0x0E3C, 0, 10, TileDataFlags::IMPASSABLE, 0x5A, true);
		assert_eq!(None, classify_object(&TileObject::Static(limit), &ghost));
		let heavy = StaticTile::item(0x0E3C, 0, 10, TileDataFlags::IMPASSABLE, 0x5B, true);
		assert!(classify_object(&TileObject::Static(heavy), &ghost).is_some());
	}
	#[test]
	fn game_masters_pass_unlocked_items() {
		let ghost = StepContext {
			step_state: StepState::DeadOrGm,
			..walker()
		};
		let gm = StepContext {
			is_gm: true,
			..ghost
		};
		let unlocked = StaticTile::item(0x0E40, 0, 10, TileDataFlags::IMPASSABLE, 0xFF, false);
		assert_eq!(None, classify_object(&TileObject::Static(unlocked), &gm));
		assert!(classify_object(&TileObject::Static(unlocked), &ghost).is_some());
		let locked = StaticTile::item(0x0E40, 0, 10, TileDataFlags::IMPASSABLE, 0xFF, true);
		assert!(classify_object(&TileObject::Static(locked), &gm).is_some());
		// only in the dead or gm state
		let living_gm = StepContext {
			is_gm: true,
			..walker()
		};
		assert!(classify_object(&TileObject::Static(unlocked), &living_gm).is_some());
	}
	#[test]
	fn ghost_art_passes_for_ghosts_only() {
		let ghost = StepContext {
			step_state: StepState::DeadOrGm,
			..walker()
		};
		for graphic in [0x0692, 0x06F5, 0x06F6, 0x0873] {
			let art = StaticTile::new(graphic, 0, 20, TileDataFlags::IMPASSABLE);
			assert_eq!(None, classify_object(&TileObject::Static(art), &ghost));
			assert!(classify_object(&TileObject::Static(art), &walker()).is_some());
		}
	}
	#[test]
	fn bridge_average_is_half_height() {
		let object = classify_object(&TileObject::Static(StaticTile::stairs(4, 11)), &walker()).unwrap();
		assert_eq!(4 + 5, object.average_z);
		assert_eq!(11, object.height);
		assert!(object.flags.contains(
			CollisionFlags::IMPASSABLE_OR_SURFACE | CollisionFlags::SURFACE | CollisionFlags::BRIDGE
		));
	}
	#[test]
	fn void_land_is_ignored() {
		let void = LandTile::flat(0x0002, 0, TileDataFlags::empty());
		assert_eq!(None, classify_object(&TileObject::Land(void), &walker()));
	}
	#[test]
	fn context_from_entity() {
		let entity = EntityState {
			step_state: StepState::DeadOrGm,
			..Default::default()
		};
		let context = StepContext::new(&entity, &AutowalkSettings::default());
		assert!(context.ignore_characters);
		let entity = EntityState::default();
		let context = StepContext::new(&entity, &AutowalkSettings::default());
		assert!(!context.ignore_characters);
	}
}
