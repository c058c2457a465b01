use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AuthError;
use crate::account::models::EmailAddress;
use crate::account::models::NewUser;
use crate::account::models::PhoneNumber;
use crate::account::models::Role;
use crate::account::models::RoleId;
use crate::account::models::RoleName;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::UserProfile;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const SELECT_USER: &str = r#"
    SELECT u.id, u.username, u.email, u.phone, u.password_hash, u.status,
           u.full_name, u.address, u.created_at,
           r.id AS role_id, r.name AS role_name
    FROM users u
    LEFT JOIN roles r ON r.id = u.role_id
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, AuthError> {
        let role = match (
            row.try_get::<Option<i32>, _>("role_id").map_err(db_error)?,
            row.try_get::<Option<String>, _>("role_name").map_err(db_error)?,
        ) {
            (Some(id), Some(name)) => Some(Role {
                id: RoleId(id),
                name: name
                    .parse::<RoleName>()
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            }),
            _ => None,
        };

        Ok(User {
            id: UserId(row.try_get("id").map_err(db_error)?),
            username: Username::new(row.try_get("username").map_err(db_error)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(db_error)?)?,
            phone: PhoneNumber::new(row.try_get("phone").map_err(db_error)?)?,
            password_hash: row.try_get("password_hash").map_err(db_error)?,
            role,
            status: row.try_get("status").map_err(db_error)?,
            profile: UserProfile {
                full_name: row.try_get("full_name").map_err(db_error)?,
                address: row.try_get("address").map_err(db_error)?,
            },
            created_at: row.try_get("created_at").map_err(db_error)?,
        })
    }

    async fn find_one(&self, condition: &str, value: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE {condition}"))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

fn db_error(e: sqlx::Error) -> AuthError {
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, phone, password_hash, role_id, status,
                               full_name, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_ref().map(|role| role.id.0))
        .bind(user.status)
        .bind(user.profile.full_name.as_deref())
        .bind(user.profile.address.as_deref())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // Lost a race with a concurrent registration
                if db_err.is_unique_violation() {
                    return AuthError::UserExisted;
                }
            }
            db_error(e)
        })?;

        let id: i64 = row.try_get("id").map_err(db_error)?;
        Ok(user.with_id(UserId(id)))
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        self.find_one("u.username = $1", username.as_str()).await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        self.find_one("u.email = $1", email.as_str()).await
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, AuthError> {
        self.find_one("u.phone = $1", phone.as_str()).await
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(&format!(
            r#"{SELECT_USER}
            WHERE u.username = $1 OR u.email = $1 OR u.phone = $1
            ORDER BY CASE
                WHEN u.username = $1 THEN 0
                WHEN u.email = $1 THEN 1
                ELSE 2
            END
            LIMIT 1
            "#
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
