//! Wire model of the character API's list endpoint.
//!
//! Only `results[].name` is required; every other field falls back to its
//! default so that a sparse payload still decodes.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/character`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: PageInfo,
    pub results: Vec<RemoteCharacter>,
}

impl CharacterPage {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Pagination block of a list response. Only the first page is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// A character as returned by the API. Identity is its list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCharacter {
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub origin: NamedLink,
    #[serde(default)]
    pub location: NamedLink,
    /// Avatar URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// `{ "name", "url" }` reference used for origin and location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_shaped_payload() {
        let body = r#"{
            "info": {"count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null},
            "results": [{
                "id": 1,
                "name": "Rick Sanchez",
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Male",
                "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
                "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
                "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
                "episode": ["https://rickandmortyapi.com/api/episode/1"],
                "url": "https://rickandmortyapi.com/api/character/1",
                "created": "2017-11-04T18:48:46.250Z"
            }]
        }"#;

        let page: CharacterPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.info.count, 826);
        assert!(page.info.prev.is_none());

        let rick = &page.results[0];
        assert_eq!(rick.name, "Rick Sanchez");
        assert_eq!(rick.kind, "");
        assert_eq!(rick.origin.name, "Earth (C-137)");
        assert_eq!(rick.location.name, "Citadel of Ricks");
        assert_eq!(rick.episode.len(), 1);
    }

    #[test]
    fn sparse_character_uses_defaults() {
        let page: CharacterPage =
            serde_json::from_str(r#"{"results": [{"name": "Jerry"}]}"#).unwrap();
        assert_eq!(page.info, PageInfo::default());
        assert_eq!(page.results[0].species, "");
        assert_eq!(page.results[0].origin, NamedLink::default());
    }

    #[test]
    fn missing_results_is_an_error() {
        assert!(serde_json::from_str::<CharacterPage>(r#"{"info": {}}"#).is_err());
    }
}
