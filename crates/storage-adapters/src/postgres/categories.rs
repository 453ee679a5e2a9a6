use super::{db_error, PostgresStore};
use async_trait::async_trait;
use domains::{Category, CategoryRepository, Result};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
}

#[async_trait]
impl CategoryRepository for PostgresStore {
    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    /// Names are not unique in the schema, so existence is checked per row
    /// inside one transaction.
    async fn insert_missing(&self, names: Vec<String>) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut created = 0;
        for name in &names {
            let result = sqlx::query(
                "INSERT INTO categories (id, name) \
                 SELECT $1, $2 \
                 WHERE NOT EXISTS (SELECT 1 FROM categories WHERE name = $2)",
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
            created += result.rows_affected();
        }
        tx.commit().await.map_err(db_error)?;
        Ok(created)
    }
}
