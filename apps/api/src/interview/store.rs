//! Interview persistence.
//!
//! `AppState` holds an `Arc<dyn InterviewStore>`. Production writes to
//! PostgreSQL; tests use an in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::InterviewRecord;

/// Write-only: records are created once and never read back by this service.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn save(&self, record: &InterviewRecord) -> Result<Uuid, AppError>;
}

pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn save(&self, record: &InterviewRecord) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO interviews
                (role, interview_type, level, techstack, questions,
                 user_id, finalized, cover_image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&record.role)
        .bind(&record.interview_type)
        .bind(&record.level)
        .bind(&record.techstack)
        .bind(&record.questions)
        .bind(&record.user_id)
        .bind(record.finalized)
        .bind(&record.cover_image)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Interview {id} saved for user '{}'", record.user_id);
        Ok(id)
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use super::*;

    /// In-memory store for handler tests. Set `fail` to simulate an outage.
    #[derive(Default)]
    pub struct MemoryInterviewStore {
        pub records: Mutex<Vec<InterviewRecord>>,
        pub fail: bool,
    }

    #[async_trait]
    impl InterviewStore for MemoryInterviewStore {
        async fn save(&self, record: &InterviewRecord) -> Result<Uuid, AppError> {
            if self.fail {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            self.records
                .lock()
                .expect("store lock poisoned")
                .push(record.clone());
            Ok(Uuid::new_v4())
        }
    }
}
