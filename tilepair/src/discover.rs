//! Slippy-map tile directory discovery.
//!
//! Scans a directory laid out as `<root>/<z>/<x>/<y>.<ext>` and yields one
//! record per tile image found. Entries that do not fit the layout (stray
//! files, non-numeric directories, hidden names, unknown extensions) are
//! skipped; a missing root is a hard error because a dataset pointed at a
//! nonexistent directory is a configuration mistake, not an empty dataset.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::coord::{TileCoord, MAX_ZOOM};

/// Errors that can occur while scanning a tile directory.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The tile root directory does not exist or is not a directory.
    #[error("Tile directory does not exist: {0}")]
    RootNotFound(PathBuf),

    /// I/O error while enumerating directory entries.
    #[error("I/O error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A discovered tile: its coordinate plus the file that holds its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// Tile coordinate recovered from the directory layout.
    pub coord: TileCoord,
    /// Path to the tile image file.
    pub path: PathBuf,
}

/// Get the tile leaf filename pattern: a numeric stem plus a raster extension.
///
/// Example matches: `2000.png`, `17.jpg`, `42.webp`.
fn leaf_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // (\d+)                - tile row (y)
        // \.(png|jpe?g|webp)   - raster extension, case insensitive
        Regex::new(r"^(\d+)\.(?i:png|jpe?g|webp)$").unwrap()
    })
}

/// Scan a slippy-map tile directory, yielding `(coordinate, path)` records.
///
/// The returned order follows directory enumeration and is not specified;
/// callers that need determinism sort by [`TileCoord`].
///
/// # Errors
///
/// Fails if `dir` does not exist or an entry cannot be enumerated. Individual
/// files that do not look like tiles are skipped, not errors.
pub fn tiles_from_slippy_map(dir: &Path) -> Result<Vec<TileRecord>, DiscoverError> {
    if !dir.is_dir() {
        return Err(DiscoverError::RootNotFound(dir.to_path_buf()));
    }

    let mut records = Vec::new();

    for z_entry in read_dir(dir)? {
        let z_path = z_entry.path();
        let Some(z) = numeric_dir_name::<u8>(&z_entry) else {
            continue;
        };
        if !z_path.is_dir() || z > MAX_ZOOM {
            continue;
        }

        for x_entry in read_dir(&z_path)? {
            let x_path = x_entry.path();
            let Some(x) = numeric_dir_name::<u32>(&x_entry) else {
                continue;
            };
            if !x_path.is_dir() {
                continue;
            }

            for y_entry in read_dir(&x_path)? {
                let y_path = y_entry.path();
                if !y_path.is_file() {
                    continue;
                }
                let name = y_entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };
                let Some(captures) = leaf_pattern().captures(name) else {
                    tracing::debug!(file = %y_path.display(), "Skipping non-tile file");
                    continue;
                };
                // The stem is all digits, but may still overflow u32
                let Ok(y) = captures[1].parse::<u32>() else {
                    continue;
                };

                records.push(TileRecord {
                    coord: TileCoord::new(z, x, y),
                    path: y_path,
                });
            }
        }
    }

    Ok(records)
}

/// Parse a directory entry's name as a number, if it is one.
///
/// Hidden names and anything non-numeric yield `None`.
fn numeric_dir_name<T: std::str::FromStr>(entry: &std::fs::DirEntry) -> Option<T> {
    let name = entry.file_name();
    let name = name.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    name.parse().ok()
}

fn read_dir(dir: &Path) -> Result<Vec<std::fs::DirEntry>, DiscoverError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoverError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| DiscoverError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_tile(root: &Path, z: u8, x: u32, y: u32) -> PathBuf {
        let dir = root.join(z.to_string()).join(x.to_string());
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.png", y));
        std::fs::write(&path, b"fake png").unwrap();
        path
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = tiles_from_slippy_map(&temp.path().join("nope"));
        assert!(matches!(result, Err(DiscoverError::RootNotFound(_))));
    }

    #[test]
    fn test_empty_root_yields_no_records() {
        let temp = TempDir::new().unwrap();
        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_finds_tiles_with_coordinates() {
        let temp = TempDir::new().unwrap();
        let path = write_tile(temp.path(), 18, 1000, 2000);

        let records = tiles_from_slippy_map(temp.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coord, TileCoord::new(18, 1000, 2000));
        assert_eq!(records[0].path, path);
    }

    #[test]
    fn test_finds_tiles_across_zooms_and_columns() {
        let temp = TempDir::new().unwrap();
        write_tile(temp.path(), 1, 0, 0);
        write_tile(temp.path(), 1, 1, 0);
        write_tile(temp.path(), 2, 3, 1);

        let mut records = tiles_from_slippy_map(temp.path()).unwrap();
        records.sort_by_key(|r| r.coord);

        let coords: Vec<_> = records.iter().map(|r| r.coord).collect();
        assert_eq!(
            coords,
            vec![
                TileCoord::new(1, 0, 0),
                TileCoord::new(1, 1, 0),
                TileCoord::new(2, 3, 1),
            ]
        );
    }

    #[test]
    fn test_skips_non_numeric_directories() {
        let temp = TempDir::new().unwrap();
        write_tile(temp.path(), 5, 10, 20);
        std::fs::create_dir_all(temp.path().join("metadata").join("10")).unwrap();
        std::fs::write(
            temp.path().join("metadata").join("10").join("20.png"),
            b"not a tile",
        )
        .unwrap();

        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coord, TileCoord::new(5, 10, 20));
    }

    #[test]
    fn test_skips_hidden_directories() {
        let temp = TempDir::new().unwrap();
        write_tile(temp.path(), 5, 10, 20);
        std::fs::create_dir_all(temp.path().join(".thumbnails")).unwrap();

        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_skips_non_tile_leaf_files() {
        let temp = TempDir::new().unwrap();
        write_tile(temp.path(), 5, 10, 20);
        let x_dir = temp.path().join("5").join("10");
        std::fs::write(x_dir.join("index.json"), b"{}").unwrap();
        std::fs::write(x_dir.join("20.png.aux"), b"aux").unwrap();

        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_accepts_jpeg_and_webp_extensions() {
        let temp = TempDir::new().unwrap();
        let x_dir = temp.path().join("7").join("3");
        std::fs::create_dir_all(&x_dir).unwrap();
        std::fs::write(x_dir.join("1.jpg"), b"j").unwrap();
        std::fs::write(x_dir.join("2.jpeg"), b"j").unwrap();
        std::fs::write(x_dir.join("3.webp"), b"w").unwrap();
        std::fs::write(x_dir.join("4.PNG"), b"p").unwrap();

        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_skips_zoom_beyond_maximum() {
        let temp = TempDir::new().unwrap();
        write_tile(temp.path(), 22, 0, 0);
        // 23 parses as u8 but is past MAX_ZOOM
        let dir = temp.path().join("23").join("0");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("0.png"), b"p").unwrap();

        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coord.z, 22);
    }

    #[test]
    fn test_duplicate_y_across_extensions_yields_two_records() {
        // Discovery reports what is on disk; de-duplication is not its job
        let temp = TempDir::new().unwrap();
        let x_dir = temp.path().join("9").join("4");
        std::fs::create_dir_all(&x_dir).unwrap();
        std::fs::write(x_dir.join("7.png"), b"p").unwrap();
        std::fs::write(x_dir.join("7.jpg"), b"j").unwrap();

        let records = tiles_from_slippy_map(temp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].coord, records[1].coord);
    }
}
