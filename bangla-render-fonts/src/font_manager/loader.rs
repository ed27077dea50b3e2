//! fontdb lookups that turn a family name into loaded face bytes.

use fontdb::{Database, Family, ID, Query, Style, Weight};

use super::types::FontData;

/// Load the regular face of `family_name` from the database.
pub fn load_font_from_db(font_db: &Database, family_name: &str) -> Option<FontData> {
    let query = Query {
        families: &[Family::Name(family_name)],
        weight: Weight::NORMAL,
        style: Style::Normal,
        ..Query::default()
    };
    let id = font_db.query(&query)?;
    load_face(font_db, id, family_name)
}

/// Load the first face in the database that parses, regardless of family.
pub fn load_any_font(font_db: &Database) -> Option<FontData> {
    font_db.faces().find_map(|face| {
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        load_face(font_db, face.id, &family)
    })
}

fn load_face(font_db: &Database, id: ID, family_name: &str) -> Option<FontData> {
    let loaded = font_db.with_face_data(id, |data, face_index| {
        FontData::new_with_index(data.to_vec(), face_index, family_name)
    });
    match loaded {
        Some(Some(font_data)) => Some(font_data),
        _ => {
            log::warn!("Font '{}' found but failed to load data", family_name);
            None
        }
    }
}
