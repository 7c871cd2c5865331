use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Failure to load the preset layout file. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to read layouts from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse layouts: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout {name:?}: {reason}")]
    Malformed { name: String, reason: String },
    #[error("layout file contains no layouts")]
    Empty,
}

/// A named rectangular pattern, row-major like [`crate::grid::Grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: String,
    pub width: u32,
    pub height: u32,
    cells: Vec<bool>,
}

impl Layout {
    /// Parse a pattern from rows of `O`/`*` (alive) and `.` (dead).
    pub fn from_rows<S: AsRef<str>>(name: &str, rows: &[S]) -> Result<Self, LayoutError> {
        let malformed = |reason: String| LayoutError::Malformed {
            name: name.to_string(),
            reason,
        };

        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if rows.is_empty() || width == 0 {
            return Err(malformed("pattern is empty".into()));
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(malformed(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for ch in row.chars() {
                match ch {
                    'O' | '*' => cells.push(true),
                    '.' => cells.push(false),
                    other => return Err(malformed(format!("unexpected {other:?} in row {y}"))),
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            width: width as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Whether the pattern cell at `(x, y)` is alive. `x < width`, `y < height`.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    #[cfg(test)]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[derive(Debug, Deserialize)]
struct LayoutRecord {
    name: String,
    rows: Vec<String>,
}

/// Read-only set of preset layouts, loaded once at startup.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    layouts: Vec<Layout>,
}

impl LayoutStore {
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&text)?;
        log::info!("Loaded {} layouts from {}", store.count(), path.display());
        Ok(store)
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let records: Vec<LayoutRecord> = serde_json::from_str(text)?;
        if records.is_empty() {
            return Err(LayoutError::Empty);
        }
        let layouts = records
            .iter()
            .map(|r| Layout::from_rows(&r.name, r.rows.as_slice()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layouts })
    }

    pub fn count(&self) -> usize {
        self.layouts.len()
    }

    pub fn get(&self, index: usize) -> Option<&Layout> {
        self.layouts.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_glider() {
        let layout = Layout::from_rows("Glider", &[".O.", "..O", "OOO"]).unwrap();
        assert_eq!((layout.width, layout.height), (3, 3));
        assert_eq!(layout.population(), 5);
        assert!(layout.get(1, 0));
        assert!(!layout.get(0, 0));
        assert!(layout.get(2, 2));
    }

    #[test]
    fn star_counts_as_alive() {
        let layout = Layout::from_rows("Dot", &["*"]).unwrap();
        assert!(layout.get(0, 0));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Layout::from_rows("Bad", &["OO", "O"]).unwrap_err();
        assert!(matches!(err, LayoutError::Malformed { .. }));
    }

    #[test]
    fn unknown_character_rejected() {
        assert!(Layout::from_rows("Bad", &["OxO"]).is_err());
    }

    #[test]
    fn empty_pattern_rejected() {
        assert!(Layout::from_rows::<&str>("Bad", &[]).is_err());
        assert!(Layout::from_rows("Bad", &[""]).is_err());
    }

    #[test]
    fn store_from_json() {
        let store = LayoutStore::from_json(
            r#"[{"name": "Block", "rows": ["OO", "OO"]},
                {"name": "Blinker", "rows": ["OOO"]}]"#,
        )
        .unwrap();
        assert_eq!(store.count(), 2);
        assert_eq!(store.get(1).unwrap().name, "Blinker");
        assert!(store.get(2).is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            LayoutStore::from_json("{not json"),
            Err(LayoutError::Json(_))
        ));
        assert!(matches!(LayoutStore::from_json("[]"), Err(LayoutError::Empty)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("conway_life_test_no_such_layouts.json");
        let _ = fs::remove_file(&path);
        assert!(matches!(LayoutStore::load(&path), Err(LayoutError::Io { .. })));
    }

    #[test]
    fn load_roundtrip_through_file() {
        let path = std::env::temp_dir().join("conway_life_test_layouts.json");
        fs::write(&path, r#"[{"name": "Glider", "rows": [".O.", "..O", "OOO"]}]"#).unwrap();
        let store = LayoutStore::load(&path).unwrap();
        assert_eq!(store.get(0).unwrap().population(), 5);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn shipped_layouts_parse() {
        let path = crate::config::Config::default().layouts_path;
        let store = LayoutStore::load(&path).unwrap();
        assert!(store.count() > 0);
    }
}
