//! Lookup of the opaque visual asset for a tile, e.g. an SVG image.
use crate::error::HandError;
use crate::hand::Hand;
use crate::tile::Tile;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::trace;
use walkdir::WalkDir;

pub trait AssetLookup {
    /// The asset named `key`. Zero or several matches are an
    /// [`HandError::AssetNotFound`].
    fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Assets stored as `<key>.<extension>` files anywhere under a directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
    extension: String,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "svg".to_owned(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetLookup for AssetDir {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let file_name = format!("{key}.{}", self.extension);
        let mut matches = vec![];
        for entry in WalkDir::new(&self.root) {
            let entry = entry.with_context(|| format!("scanning {}", self.root.display()))?;
            if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
                matches.push(entry.into_path());
            }
        }
        let [path] = matches.as_slice() else {
            return Err(HandError::AssetNotFound {
                key: key.to_owned(),
                matches: matches.len(),
            }
            .into());
        };
        trace!("asset {key} -> {}", path.display());
        fs::read(path).with_context(|| format!("reading {}", path.display()))
    }
}

impl Tile {
    pub fn asset(self, lookup: &impl AssetLookup) -> Result<Vec<u8>> {
        lookup.get(&self.asset_key())
    }
}

impl Hand {
    /// One asset per tile, in hand order.
    pub fn assets(&self, lookup: &impl AssetLookup) -> Result<Vec<Vec<u8>>> {
        self.tiles().iter().map(|tile| tile.asset(lookup)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(err: &anyhow::Error) -> Option<usize> {
        match err.downcast_ref::<HandError>()? {
            HandError::AssetNotFound { matches, .. } => Some(*matches),
            _ => None,
        }
    }

    #[test]
    fn finds_exactly_one() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Man1.svg"), "<svg>man1</svg>").unwrap();
        fs::write(dir.path().join("Chun.svg"), "<svg>chun</svg>").unwrap();
        fs::write(dir.path().join("Man1.png"), "png").unwrap();

        let assets = AssetDir::new(dir.path());
        assert_eq!(assets.get("Man1").unwrap(), b"<svg>man1</svg>");
        assert_eq!("red".parse::<Tile>().unwrap().asset(&assets).unwrap(), b"<svg>chun</svg>");
        assert_eq!(assets.clone().with_extension("png").get("Man1").unwrap(), b"png");
    }

    #[test]
    fn missing_or_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("alt")).unwrap();
        fs::write(dir.path().join("Pin5.svg"), "a").unwrap();
        fs::write(dir.path().join("alt").join("Pin5.svg"), "b").unwrap();

        let assets = AssetDir::new(dir.path());
        assert_eq!(not_found(&assets.get("Pin5").unwrap_err()), Some(2));
        assert_eq!(not_found(&assets.get("Sou5").unwrap_err()), Some(0));
    }

    #[test]
    fn hand_assets() {
        let dir = tempfile::tempdir().unwrap();
        let hand: Hand = "1c 1c 1c 2c 2c 2c 3c 3c 3c 4c 4c 4c north north".parse().unwrap();
        for key in ["Man1", "Man2", "Man3", "Man4", "Pei"] {
            fs::write(dir.path().join(format!("{key}.svg")), key).unwrap();
        }
        let assets = hand.assets(&AssetDir::new(dir.path())).unwrap();
        assert_eq!(assets.len(), 14);
        assert_eq!(assets[13], b"Pei");

        fs::remove_file(dir.path().join("Pei.svg")).unwrap();
        assert!(hand.assets(&AssetDir::new(dir.path())).is_err());
    }
}
