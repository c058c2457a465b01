use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AuthError;
use crate::account::models::Role;
use crate::account::models::RoleId;
use crate::account::models::RoleName;
use crate::account::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => {
                let name: String = r
                    .try_get("name")
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
                Ok(Some(Role {
                    id,
                    name: name
                        .parse::<RoleName>()
                        .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
                }))
            }
            None => Ok(None),
        }
    }
}
