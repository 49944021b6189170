//! Locally saved character model and DTOs.

use morty_core::error::CoreError;
use morty_core::types::DbId;
use morty_core::validation::validate_new_character;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub species: String,
    pub gender: String,
    pub status: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Local creation time, `YYYY-MM-DD HH:MM:SS`.
    pub created: String,
    /// Raw image bytes as picked by the user.
    #[serde(skip_serializing)]
    pub image: Vec<u8>,
}

/// DTO for saving a new character. The store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub species: String,
    pub gender: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created: String,
    #[serde(default)]
    pub image: Vec<u8>,
}

impl CreateCharacter {
    /// Reject blank text fields and a missing image.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_new_character(
            &[
                ("name", self.name.as_str()),
                ("species", self.species.as_str()),
                ("gender", self.gender.as_str()),
                ("status", self.status.as_str()),
                ("type", self.kind.as_str()),
            ],
            Some(self.image.as_slice()),
        )
    }
}

impl Character {
    /// Copy of this row's fields as a create DTO (new id on insert).
    pub fn to_create(&self) -> CreateCharacter {
        CreateCharacter {
            name: self.name.clone(),
            species: self.species.clone(),
            gender: self.gender.clone(),
            status: self.status.clone(),
            kind: self.kind.clone(),
            created: self.created.clone(),
            image: self.image.clone(),
        }
    }
}
