//! PostgreSQL verification store.
//!
//! Transactional source of truth for configured deployments. Status
//! updates are single-row conditional writes, so the lifecycle guard
//! holds even across concurrent admin sessions.

use crate::traits::VerificationStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crewgate_types::{Role, StorageRef, UserId, UserProfile, VerificationStatus};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

/// PostgreSQL-backed verification store.
#[derive(Debug, Clone)]
pub struct PostgresVerificationStore {
    pool: PgPool,
}

impl PostgresVerificationStore {
    /// Connect to PostgreSQL and initialize the schema.
    pub async fn new(
        url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> StoreResult<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id UUID PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                role TEXT NOT NULL,
                verification_status TEXT NOT NULL DEFAULT 'pending',
                documents JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            );
            "#,
            r#"CREATE INDEX IF NOT EXISTS user_profiles_status
               ON user_profiles(verification_status, created_at DESC);"#,
        ];

        for stmt in statements {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        Ok(())
    }

    fn row_to_profile(row: &sqlx::postgres::PgRow) -> StoreResult<UserProfile> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let status: String = row
            .try_get("verification_status")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let documents: serde_json::Value = row
            .try_get("documents")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let role = role
            .parse::<Role>()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let verification_status = match status.as_str() {
            "pending" => VerificationStatus::Pending,
            "approved" => VerificationStatus::Approved,
            "rejected" => VerificationStatus::Rejected,
            other => {
                return Err(StoreError::Serialization(format!(
                    "unknown verification status: {}",
                    other
                )))
            }
        };
        let documents: Vec<StorageRef> = serde_json::from_value(documents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        Ok(UserProfile {
            id: UserId::from_uuid(id),
            email,
            first_name,
            last_name,
            role,
            verification_status,
            documents,
            created_at,
        })
    }
}

#[async_trait]
impl VerificationStore for PostgresVerificationStore {
    async fn create(&self, profile: UserProfile) -> StoreResult<UserId> {
        let documents = serde_json::to_value(&profile.documents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO user_profiles
                (id, email, first_name, last_name, role, verification_status,
                 documents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.role.as_str())
        .bind(profile.verification_status.as_str())
        .bind(documents)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(profile.id),
            Err(e) => {
                let unique = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if unique {
                    Err(StoreError::Conflict(format!(
                        "profile {} or email {} already exists",
                        profile.id, profile.email
                    )))
                } else {
                    Err(StoreError::Backend(e.to_string()))
                }
            }
        }
    }

    async fn get(&self, id: &UserId) -> StoreResult<Option<UserProfile>> {
        let row = sqlx::query("SELECT * FROM user_profiles WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn list_by_status(
        &self,
        status: VerificationStatus,
    ) -> StoreResult<Vec<UserProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM user_profiles
            WHERE verification_status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.iter().map(Self::row_to_profile).collect()
    }

    async fn update_status(
        &self,
        id: &UserId,
        new_status: VerificationStatus,
    ) -> StoreResult<UserProfile> {
        if !new_status.is_terminal() {
            return Err(StoreError::InvalidTransition(format!(
                "cannot move profile {} back to {}",
                id, new_status
            )));
        }

        // Conditional single-row write: the guard and the update are one
        // statement, so a concurrent admin cannot slip in between.
        let row = sqlx::query(
            r#"
            UPDATE user_profiles
            SET verification_status = $2
            WHERE id = $1 AND verification_status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id.as_uuid())
        .bind(new_status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        if let Some(row) = row {
            return Self::row_to_profile(&row);
        }

        // Distinguish a missing profile from one already decided.
        match self.get(id).await? {
            Some(profile) => Err(StoreError::InvalidTransition(format!(
                "cannot move profile {} from {} to {}",
                id, profile.verification_status, new_status
            ))),
            None => Err(StoreError::NotFound(format!("profile {} not found", id))),
        }
    }
}
