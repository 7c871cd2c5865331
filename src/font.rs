use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Failure to load the overlay font. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font: {0}")]
    Json(#[from] serde_json::Error),
    #[error("glyph {glyph:?}: {reason}")]
    BadGlyph { glyph: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct FontFile {
    width: u32,
    height: u32,
    glyphs: HashMap<String, Vec<u32>>,
    fallback: Vec<u32>,
}

/// Fixed-size bitmap font.
///
/// Each glyph is `height` rows; each row is a bitmask whose top `width` bits
/// are the pixel columns, most significant bit leftmost.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    width: u32,
    height: u32,
    glyphs: HashMap<char, Vec<u32>>,
    fallback: Vec<u32>,
}

impl BitmapFont {
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let text = fs::read_to_string(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_json(&text)?;
        log::info!(
            "Loaded {}x{} font with {} glyphs from {}",
            font.width,
            font.height,
            font.glyphs.len(),
            path.display()
        );
        Ok(font)
    }

    pub fn from_json(text: &str) -> Result<Self, FontError> {
        let file: FontFile = serde_json::from_str(text)?;

        let check = |name: &str, rows: &[u32]| -> Result<(), FontError> {
            let bad = |reason: String| FontError::BadGlyph {
                glyph: name.to_string(),
                reason,
            };
            if rows.len() != file.height as usize {
                return Err(bad(format!("{} rows, expected {}", rows.len(), file.height)));
            }
            if let Some(row) = rows.iter().find(|&&r| file.width < 32 && r >> file.width != 0) {
                return Err(bad(format!("row {row:#b} wider than {} columns", file.width)));
            }
            Ok(())
        };

        if file.width == 0 || file.width > 32 || file.height == 0 {
            return Err(FontError::BadGlyph {
                glyph: String::new(),
                reason: format!("unsupported cell size {}x{}", file.width, file.height),
            });
        }
        check("fallback", &file.fallback)?;

        let mut glyphs = HashMap::with_capacity(file.glyphs.len());
        for (key, rows) in file.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(FontError::BadGlyph {
                    glyph: key,
                    reason: "key must be a single character".into(),
                });
            };
            check(&key, &rows)?;
            glyphs.insert(ch, rows);
        }

        Ok(Self {
            width: file.width,
            height: file.height,
            glyphs,
            fallback: file.fallback,
        })
    }

    pub fn glyph_width(&self) -> u32 {
        self.width
    }

    pub fn glyph_height(&self) -> u32 {
        self.height
    }

    /// Rows for `ch`. Lowercase falls back to uppercase, anything unknown to
    /// the fallback box.
    pub fn glyph(&self, ch: char) -> &[u32] {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
            .unwrap_or(&self.fallback)
    }

    /// Whether pixel `(col, row)` of the glyph for `ch` is set.
    pub fn pixel(&self, ch: char, col: u32, row: u32) -> bool {
        col < self.width
            && self
                .glyph(ch)
                .get(row as usize)
                .is_some_and(|bits| (bits >> (self.width - 1 - col)) & 1 == 1)
    }

    /// Width in font pixels of `text` with a one-pixel gap between glyphs.
    pub fn text_width(&self, text: &str) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 { 0 } else { n * (self.width + 1) - 1 }
    }
}
