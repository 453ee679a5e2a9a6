use super::{db_error, db_error_with, PostgresStore};
use async_trait::async_trait;
use domains::{Admin, Result, User, UserRepository};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password: String,
    admin_id: Option<Uuid>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password,
            admin_id: row.admin_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    user_id: Uuid,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password, admin_id) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.admin_id)
        .execute(&self.pool)
        .await
        .map_err(db_error_with("User already exists", "Referenced record does not exist"))?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, admin_id FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, admin_id FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn find_admin(&self, user_id: Uuid) -> Result<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>("SELECT id, user_id FROM admins WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(row.map(Admin::from))
    }

    /// Upsert and link run in one transaction so a user never points at a
    /// grant that was rolled back.
    async fn upsert_admin(&self, user_id: Uuid, admin_id: Uuid) -> Result<Admin> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let admin = sqlx::query_as::<_, AdminRow>(
            "INSERT INTO admins (id, user_id) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING id, user_id",
        )
        .bind(admin_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error_with("Admin already exists", "User not found"))?;

        sqlx::query("UPDATE users SET admin_id = $1 WHERE id = $2")
            .bind(admin.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(admin.into())
    }
}
