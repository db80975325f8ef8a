//! TilePair - Paired slippy-map tile datasets for translation training
//!
//! This library pairs two parallel slippy-map tile directory trees (domain A
//! and domain B) by tile coordinate and serves aligned image pairs to an
//! image-to-image translation training loop. It also ships the small
//! filename reorganization routine used to turn flat `z_x_y.png` exports
//! back into nested tile trees.

pub mod coord;
pub mod dataset;
pub mod discover;
pub mod reorg;
pub mod transform;

pub use coord::TileCoord;
pub use dataset::{DatasetError, PairedTileDataset, Phase, PhaseParseError, Sample};
pub use discover::{tiles_from_slippy_map, DiscoverError, TileRecord};
pub use reorg::{unflatten, ReorgError, UnflattenSummary};
pub use transform::{Identity, Transform};
