//! REST client for the public character API.
//!
//! [`CharacterApi`] issues the single `GET /api/character` request the app
//! needs and decodes the first page into a [`CharacterPage`]. There is no
//! retry, pagination or caching: every call goes to the network.

pub mod api;
pub mod models;

pub use api::{CharacterApi, RemoteError, CHARACTERS_PATH, DEFAULT_BASE_URL};
pub use models::{CharacterPage, NamedLink, PageInfo, RemoteCharacter};
