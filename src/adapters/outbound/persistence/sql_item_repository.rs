use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::{
    domain::{
        errors::{ItemError, ItemResult},
        models::{Item, ItemChanges},
        value_objects::{ImageLocator, ItemId},
    },
    ports::repositories::ItemRepository,
};

/// SQL-backed implementation of ItemRepository using SQLite.
#[derive(Clone)]
pub struct SqlItemRepository {
    pool: SqlitePool,
}

impl SqlItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the items table.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                image_locator TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn store_error(error: sqlx::Error) -> ItemError {
        ItemError::StoreUnavailable {
            message: "record store request failed".to_string(),
            source: Some(error.to_string()),
        }
    }

    fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> ItemResult<Item> {
        let id: String = row.get("id");
        let id = ItemId::parse(&id).map_err(|_| ItemError::StoreUnavailable {
            message: format!("corrupt record id in store: {}", id),
            source: None,
        })?;

        let image_locator: Option<String> = row.get("image_locator");
        let created_at: DateTime<Utc> = row.get("created_at");
        let updated_at: DateTime<Utc> = row.get("updated_at");

        Ok(Item {
            id,
            title: row.get("title"),
            description: row.get("description"),
            image_locator: image_locator.map(ImageLocator::new),
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl ItemRepository for SqlItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let rows = sqlx::query("SELECT * FROM items")
            .fetch_all(&self.pool)
            .await
            .map_err(Self::store_error)?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn get(&self, id: &ItemId) -> ItemResult<Option<Item>> {
        let row = sqlx::query("SELECT * FROM items WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::store_error)?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn put(&self, item: &Item) -> ItemResult<()> {
        sqlx::query(
            r#"
            INSERT INTO items (id, title, description, image_locator, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id)
            DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                image_locator = excluded.image_locator,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(item.id.to_string())
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.image_locator.as_ref().map(|l| l.as_str().to_string()))
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Self::store_error)?;

        Ok(())
    }

    async fn update(&self, id: &ItemId, changes: &ItemChanges) -> ItemResult<()> {
        sqlx::query(
            r#"
            UPDATE items SET
                title = COALESCE(?1, title),
                description = COALESCE(?2, description),
                image_locator = COALESCE(?3, image_locator),
                updated_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(
            changes
                .image_locator
                .as_ref()
                .map(|l| l.as_str().to_string()),
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(Self::store_error)?;

        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> ItemResult<()> {
        sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::store_error)?;

        Ok(())
    }

    async fn check_connectivity(&self) -> ItemResult<()> {
        sqlx::query("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ItemError::StoreUnavailable {
                message: "items table is not reachable".to_string(),
                source: Some(e.to_string()),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewItemFields;

    async fn repo() -> SqlItemRepository {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let repo = SqlItemRepository::new(pool);
        repo.migrate().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let repo = repo().await;
        let mut item = Item::create(NewItemFields {
            title: "stored".to_string(),
            description: "in sqlite".to_string(),
        });
        item.image_locator = Some(ImageLocator::new("memory://b/images/x.png".to_string()));

        repo.put(&item).await.unwrap();
        let fetched = repo.get(&item.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, item.id);
        assert_eq!(fetched.title, "stored");
        assert_eq!(fetched.image_locator, item.image_locator);
    }

    #[tokio::test]
    async fn test_update_overwrites_named_fields_only() {
        let repo = repo().await;
        let item = Item::create(NewItemFields {
            title: "before".to_string(),
            description: "unchanged".to_string(),
        });
        repo.put(&item).await.unwrap();

        let changes = ItemChanges {
            title: Some("after".to_string()),
            ..Default::default()
        };
        repo.update(&item.id, &changes).await.unwrap();

        let fetched = repo.get(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.description, "unchanged");
        assert_eq!(fetched.image_locator, None);
        assert!(fetched.updated_at >= item.updated_at);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_check_connectivity() {
        let repo = repo().await;
        repo.check_connectivity().await.unwrap();

        let item = Item::create(NewItemFields {
            title: "t".to_string(),
            description: "d".to_string(),
        });
        repo.put(&item).await.unwrap();
        repo.delete(&item.id).await.unwrap();
        repo.delete(&item.id).await.unwrap();
        assert!(repo.get(&item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_check_connectivity_fails_without_table() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let repo = SqlItemRepository::new(pool);
        assert!(repo.check_connectivity().await.is_err());
    }
}
