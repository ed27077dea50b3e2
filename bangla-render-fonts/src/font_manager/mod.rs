//! Font management with silent family substitution.
//!
//! This module resolves family names to loaded faces. It supports:
//! - System font discovery through fontdb
//! - Registering extra font files or bytes at runtime
//! - Substitution through the Bengali-first fallback chain when a family is missing
//! - A last-resort pick of any installed face

mod fallbacks;
mod loader;
mod types;

use std::collections::HashMap;
use std::path::Path;

use fontdb::Database;

use crate::error::FontError;

pub use fallbacks::FALLBACK_FAMILIES;
pub use types::FontData;

/// Resolves requested families to faces, remembering each resolution.
///
/// The remembered faces are raw font bytes keyed by family name. Rendered
/// bitmaps are never kept here.
pub struct FontManager {
    /// Font database for system font queries
    font_db: Database,

    /// Faces already resolved, keyed by the requested family name
    resolved: HashMap<String, FontData>,
}

impl FontManager {
    /// Create a FontManager backed by every font installed on the system.
    pub fn new() -> Self {
        let mut font_db = Database::new();
        font_db.load_system_fonts();
        log::info!("Loaded {} system fonts", font_db.len());
        Self::with_database(font_db)
    }

    /// Create a FontManager over a caller-populated database.
    pub fn with_database(font_db: Database) -> Self {
        Self {
            font_db,
            resolved: HashMap::new(),
        }
    }

    /// Register a font file (TTF/OTF/TTC) in addition to the system fonts.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        self.font_db.load_font_file(path)?;
        log::info!("Registered font file {:?}", path);
        // A newly registered face may satisfy a family that was substituted earlier
        self.resolved.clear();
        Ok(())
    }

    /// Register font bytes in addition to the system fonts.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_db.load_font_data(data);
        self.resolved.clear();
    }

    /// Number of faces known to the database.
    pub fn font_count(&self) -> usize {
        self.font_db.len()
    }

    /// Whether `family` is installed under that exact name.
    pub fn has_family(&self, family: &str) -> bool {
        loader::load_font_from_db(&self.font_db, family).is_some()
    }

    /// Resolve `family` to a face.
    ///
    /// When the family is not installed, the first available fallback family
    /// is substituted and a warning is logged. No error is raised for a
    /// missing family; only a system without any usable face fails.
    pub fn resolve(&mut self, family: &str) -> Result<FontData, FontError> {
        if let Some(font_data) = self.resolved.get(family) {
            return Ok(font_data.clone());
        }

        let font_data = self.load_with_substitution(family)?;
        self.resolved.insert(family.to_string(), font_data.clone());
        Ok(font_data)
    }

    fn load_with_substitution(&self, family: &str) -> Result<FontData, FontError> {
        if let Some(font_data) = loader::load_font_from_db(&self.font_db, family) {
            log::info!("Resolved font family: {}", family);
            return Ok(font_data);
        }

        for fallback in FALLBACK_FAMILIES {
            if let Some(font_data) = loader::load_font_from_db(&self.font_db, fallback) {
                log::warn!(
                    "Font '{}' not found, substituting fallback '{}'",
                    family,
                    fallback
                );
                return Ok(font_data);
            }
        }

        match loader::load_any_font(&self.font_db) {
            Some(font_data) => {
                log::warn!(
                    "Font '{}' and all fallbacks missing, substituting '{}'",
                    family,
                    font_data.family
                );
                Ok(font_data)
            }
            None => Err(FontError::NoFontsAvailable),
        }
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database_has_no_fonts() {
        let mut fm = FontManager::with_database(Database::new());
        assert_eq!(fm.font_count(), 0);
        assert!(matches!(
            fm.resolve("Noto Sans Bengali"),
            Err(FontError::NoFontsAvailable)
        ));
    }

    #[test]
    fn test_missing_family_is_substituted() {
        let mut fm = FontManager::new();
        if fm.font_count() == 0 {
            return;
        }
        let font = fm
            .resolve("No Such Family 1234")
            .expect("an installed face should be substituted");
        assert!(font.font_ref().is_some());
        assert!(!fm.has_family("No Such Family 1234"));
    }

    #[test]
    fn test_resolution_is_remembered() {
        let mut fm = FontManager::new();
        if fm.font_count() == 0 {
            return;
        }
        let first = fm.resolve("No Such Family 1234").unwrap();
        let second = fm.resolve("No Such Family 1234").unwrap();
        assert!(std::sync::Arc::ptr_eq(&first.data, &second.data));
    }
}
