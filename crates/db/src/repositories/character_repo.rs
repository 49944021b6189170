//! Repository for the `characters` table.

use morty_core::types::DbId;

use crate::models::character::{Character, CreateCharacter};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, species, gender, status, type, created, image";

/// Provides CRUD operations for locally saved characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row with its id.
    pub async fn create(pool: &DbPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (name, species, gender, status, type, created, image)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.gender)
            .bind(&input.status)
            .bind(&input.kind)
            .bind(&input.created)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Insert a row with an explicit id, replacing any row that already
    /// has that id. The row keeps its position in id order.
    pub async fn upsert(pool: &DbPool, row: &Character) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (id, name, species, gender, status, type, created, image)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                species = excluded.species,
                gender = excluded.gender,
                status = excluded.status,
                type = excluded.type,
                created = excluded.created,
                image = excluded.image
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.species)
            .bind(&row.gender)
            .bind(&row.status)
            .bind(&row.kind)
            .bind(&row.created)
            .bind(&row.image)
            .fetch_one(pool)
            .await
    }

    /// Find a character by id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = ?");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every character, ordered by id ascending (insertion order).
    pub async fn list_all(pool: &DbPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id ASC");
        sqlx::query_as::<_, Character>(&query).fetch_all(pool).await
    }

    /// Delete a character by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every character. Returns the number of rows removed.
    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters").execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters")
            .fetch_one(pool)
            .await
    }
}
