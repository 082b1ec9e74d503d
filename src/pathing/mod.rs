//! Autowalk pathfinding for isometric tile worlds where every tile is a stack of objects
//! at different heights.
//!
//! The pieces depend on each other leaves first:
//!
//! ```text
//!  TileQuery (map store, supplied by the game)
//!      |
//!  CollisionResolver   which heights of a tile can be stood on, and from where
//!      |
//!  try_step            is a single step legal, where does it land
//!      |
//!  PathSearch          bounded A* using try_step as its edges
//!      |
//!  Autowalker          walks the path one step per tick via a MovementController
//! ```
//!
//! Heights are signed game units in `-128..=127`, a mover can climb or drop at most
//! [utilities::DEFAULT_BLOCK_HEIGHT] in one step. Tiles are addressed by `(x, y)` with
//! `y` growing southwards.
//!

pub mod collision;
pub mod node_pool;
pub mod search;
pub mod step;
pub mod tile_map;
pub mod tiles;
pub mod utilities;
pub mod walker;
