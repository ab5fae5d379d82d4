//! Saved Julia constants.
//!
//! One favorite per line, `real:imaginary`, written with `f64`'s shortest
//! round-trip formatting. Indices are 1-based and count valid lines only, so
//! a corrupt line never leaves a gap.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use juliascope_core::Complex;

use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Line codec
// ---------------------------------------------------------------------------

pub fn format_favorite(c: Complex) -> String {
    format!("{}:{}", c.re, c.im)
}

/// Parse one `real:imaginary` line. `None` for anything malformed or non-finite.
pub fn parse_favorite(line: &str) -> Option<Complex> {
    let (re, im) = line.trim().split_once(':')?;
    let re: f64 = re.trim().parse().ok()?;
    let im: f64 = im.trim().parse().ok()?;
    (re.is_finite() && im.is_finite()).then(|| Complex::new(re, im))
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Where favorite lines live.
pub trait FavoriteStore: Send {
    /// Every stored line, in order. An absent store reads as empty.
    fn read_all(&self) -> io::Result<Vec<String>>;

    fn append(&mut self, line: &str) -> io::Result<()>;
}

/// Plain text file, one line per favorite.
#[derive(Debug, Clone)]
pub struct FileFavoriteStore {
    path: PathBuf,
}

impl FileFavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoriteStore for FileFavoriteStore {
    fn read_all(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.lines().map(str::to_owned).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No favorites file at {}", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

/// In-memory store for hosts without a filesystem and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFavoriteStore {
    lines: Vec<String>,
}

impl MemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl FavoriteStore for MemoryFavoriteStore {
    fn read_all(&self) -> io::Result<Vec<String>> {
        Ok(self.lines.clone())
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Favorite {
    pub index: u32,
    pub point: Complex,
}

impl fmt::Display for Favorite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.point)
    }
}

/// The loaded favorites list plus the store it writes through to.
pub struct Favorites {
    store: Box<dyn FavoriteStore>,
    entries: Vec<Favorite>,
}

impl Favorites {
    /// Read every line from `store`, skipping malformed ones.
    pub fn load(store: impl FavoriteStore + 'static) -> crate::Result<Self> {
        let lines = store.read_all()?;
        let mut entries = Vec::with_capacity(lines.len());
        for (line_no, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_favorite(line) {
                Some(point) => entries.push(Favorite {
                    index: entries.len() as u32 + 1,
                    point,
                }),
                None => warn!(line = line_no + 1, content = %line, "Skipping malformed favorite"),
            }
        }
        info!(count = entries.len(), "Loaded favorites");
        Ok(Self {
            store: Box::new(store),
            entries,
        })
    }

    /// Append `point` to the store and return its index.
    pub fn add(&mut self, point: Complex) -> crate::Result<u32> {
        self.store.append(&format_favorite(point))?;
        let index = self.entries.last().map_or(1, |f| f.index + 1);
        self.entries.push(Favorite { index, point });
        info!(index, %point, "Saved favorite");
        Ok(index)
    }

    pub fn get(&self, index: u32) -> crate::Result<Complex> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i as usize))
            .map(|f| f.point)
            .ok_or(ExplorerError::UnknownFavorite(index))
    }

    pub fn entries(&self) -> &[Favorite] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Favorites {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Favorites")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
