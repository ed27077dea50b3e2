//! Font data types for font management.

use std::sync::Arc;
use swash::FontRef;

/// Stores the raw bytes of one resolved font face.
///
/// Swash and rustybuzz both borrow from these bytes; a `FontRef` is
/// created on demand with [`FontData::font_ref`] so no self-referential
/// lifetime is needed.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within the data (non-zero only for collections)
    pub face_index: u32,
    /// Family name this face was loaded under
    pub family: String,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("family", &self.family)
            .field("face_index", &self.face_index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// # Returns
    /// `Some(FontData)` if the font data is valid, `None` otherwise.
    pub fn new(data: Vec<u8>, family: impl Into<String>) -> Option<Self> {
        Self::new_with_index(data, 0, family)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(
        data: Vec<u8>,
        face_index: u32,
        family: impl Into<String>,
    ) -> Option<Self> {
        FontRef::from_index(&data, face_index as usize)?;
        Some(FontData {
            data: Arc::new(data),
            face_index,
            family: family.into(),
        })
    }

    /// Swash font reference for glyph metrics and rasterization.
    pub fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(self.data.as_slice(), self.face_index as usize)
    }
}
