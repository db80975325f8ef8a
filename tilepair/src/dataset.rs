//! Paired slippy-map tile dataset.
//!
//! Pairs two parallel tile directory trees (domain A, domain B) by tile
//! coordinate for image-to-image translation training. Both domains are
//! scanned independently, their coordinate sets intersected, and each
//! domain's records filtered to the common set and sorted by coordinate.
//! Because both lists are filtered to the identical set and sorted with the
//! identical comparator, position `i` in either list refers to the same
//! tile — that alignment is the load-bearing invariant of this module.
//!
//! Access is read-only over state frozen at construction, so a dataset can
//! be shared across worker threads without locking. Tiles are re-read from
//! disk on every access: batching, shuffling, and caching belong to the
//! training framework, and a cache here would break per-epoch augmentation
//! randomness owned by the transform.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{DynamicImage, ImageReader, RgbImage};
use thiserror::Error;

use crate::coord::TileCoord;
use crate::discover::{tiles_from_slippy_map, DiscoverError, TileRecord};
use crate::transform::Transform;

/// Dataset split selector.
///
/// On disk the splits live under `training/` and `validation/`; the enum
/// makes that mapping explicit instead of renaming strings at construction
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Validation,
}

impl Phase {
    /// Directory name for this split under `<root>/<domain>/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Phase::Train => "training",
            Phase::Validation => "validation",
        }
    }
}

/// Error parsing a phase name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown phase {0:?} (expected 'train' or 'validation')")]
pub struct PhaseParseError(String);

impl FromStr for Phase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" | "training" => Ok(Phase::Train),
            "val" | "validation" => Ok(Phase::Validation),
            other => Err(PhaseParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Train => "train",
            Phase::Validation => "validation",
        })
    }
}

/// Errors from dataset construction or tile access.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Scanning a domain directory failed.
    #[error("Failed to scan domain {domain}: {source}")]
    Discover {
        domain: char,
        #[source]
        source: DiscoverError,
    },

    /// Index past the end of the paired dataset.
    #[error("Index {index} out of range for dataset of {len} pairs")]
    IndexOutOfRange { index: usize, len: usize },

    /// Tile file could not be opened.
    #[error("Failed to open tile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tile file could not be decoded as an image.
    #[error("Failed to decode tile {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// One aligned (A, B) sample.
#[derive(Debug, Clone)]
pub struct Sample<I> {
    /// Transformed domain-A tile.
    pub a: I,
    /// Transformed domain-B tile.
    pub b: I,
    /// Label for the A source file: last three path segments, `_`-joined.
    pub a_path: String,
    /// Label for the B source file, same derivation.
    pub b_path: String,
}

/// Aligned tile-pair dataset over two domain directory trees.
///
/// Expects `<root>/A/<phase>/images/**` and `<root>/B/<phase>/images/**` in
/// slippy-map layout. Tiles present in only one domain are dropped.
pub struct PairedTileDataset<T> {
    a_tiles: Vec<TileRecord>,
    b_tiles: Vec<TileRecord>,
    /// Number of distinct common coordinates; this, not the list lengths,
    /// is the dataset size (a domain may hold duplicate coordinates).
    common_len: usize,
    transform: T,
}

impl<T: Transform> PairedTileDataset<T> {
    /// Build the dataset by scanning and pairing both domains.
    ///
    /// # Errors
    ///
    /// Fails if either domain's `images` directory is missing or cannot be
    /// scanned. An empty intersection is not an error: it yields an empty
    /// dataset, and handling that is the training loop's concern.
    pub fn new(root: &Path, phase: Phase, transform: T) -> Result<Self, DatasetError> {
        let dir_a = root.join("A").join(phase.dir_name()).join("images");
        let dir_b = root.join("B").join(phase.dir_name()).join("images");

        let a_all = tiles_from_slippy_map(&dir_a)
            .map_err(|source| DatasetError::Discover { domain: 'A', source })?;
        let b_all = tiles_from_slippy_map(&dir_b)
            .map_err(|source| DatasetError::Discover { domain: 'B', source })?;

        let a_coords: BTreeSet<TileCoord> = a_all.iter().map(|r| r.coord).collect();
        let b_coords: BTreeSet<TileCoord> = b_all.iter().map(|r| r.coord).collect();
        let common: BTreeSet<TileCoord> = a_coords.intersection(&b_coords).copied().collect();

        let a_total = a_all.len();
        let b_total = b_all.len();
        let a_tiles = filter_and_sort(a_all, &common);
        let b_tiles = filter_and_sort(b_all, &common);

        tracing::debug!(
            common = common.len(),
            a_dropped = a_total - a_tiles.len(),
            b_dropped = b_total - b_tiles.len(),
            phase = %phase,
            "Paired tile domains"
        );

        debug_assert!(a_tiles.len() >= common.len() && b_tiles.len() >= common.len());

        Ok(Self {
            a_tiles,
            b_tiles,
            common_len: common.len(),
            transform,
        })
    }

    /// Number of aligned pairs: the size of the common coordinate set.
    pub fn len(&self) -> usize {
        self.common_len
    }

    /// Whether the two domains share no tiles.
    pub fn is_empty(&self) -> bool {
        self.common_len == 0
    }

    /// The aligned (A, B) records at `index`, without touching the disk.
    pub fn pair(&self, index: usize) -> Option<(&TileRecord, &TileRecord)> {
        if index >= self.common_len {
            return None;
        }
        Some((&self.a_tiles[index], &self.b_tiles[index]))
    }

    /// Load, composite, and transform the pair at `index`.
    ///
    /// The A tile, if it carries alpha, is composited over opaque white —
    /// consumers expect 3-channel opaque input. The B tile is forced to RGB
    /// with any alpha dropped. Each call re-reads both files.
    ///
    /// # Errors
    ///
    /// Out-of-range indices and unreadable or corrupt tile files are hard
    /// errors; a bad tile should halt the run rather than silently skew the
    /// batch stream.
    pub fn get(&self, index: usize) -> Result<Sample<T::Output>, DatasetError> {
        let (a_record, b_record) = self.pair(index).ok_or(DatasetError::IndexOutOfRange {
            index,
            len: self.common_len,
        })?;

        let a = flatten_onto_white(load_image(&a_record.path)?);
        let b = load_image(&b_record.path)?.into_rgb8();

        Ok(Sample {
            a: self.transform.apply(a),
            b: self.transform.apply(b),
            a_path: path_label(&a_record.path),
            b_path: path_label(&b_record.path),
        })
    }
}

fn filter_and_sort(records: Vec<TileRecord>, common: &BTreeSet<TileCoord>) -> Vec<TileRecord> {
    let mut kept: Vec<TileRecord> = records
        .into_iter()
        .filter(|r| common.contains(&r.coord))
        .collect();
    kept.sort_by_key(|r| r.coord);
    kept
}

fn load_image(path: &Path) -> Result<DynamicImage, DatasetError> {
    let reader = ImageReader::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    reader.decode().map_err(|source| DatasetError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Composite an image over an opaque white background.
///
/// Images without an alpha channel convert straight to RGB. Map tiles with
/// transparency (unlabeled area) must come out white, not black, so plain
/// alpha dropping is not enough for domain A.
fn flatten_onto_white(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u32;
        for channel in 0..3 {
            let fg = src[channel] as u32;
            // Rounded integer blend: fg*a + white*(255-a), scaled by 255
            dst[channel] = ((fg * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        }
    }
    out
}

/// Human-readable label: the last three path segments joined by `_`.
///
/// `<...>/images/18/1000/2000.png` → `18_1000_2000.png`, which is also the
/// flattened filename convention the `reorg` module unpacks.
fn path_label(path: &Path) -> String {
    let mut tail: Vec<String> = path
        .iter()
        .rev()
        .take(3)
        .map(|part| part.to_string_lossy().into_owned())
        .collect();
    tail.reverse();
    tail.join("_")
}
