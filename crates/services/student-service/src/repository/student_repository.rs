//! Student repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use tracing::warn;

use super::entities::student::{self, ActiveModel, Entity as StudentEntity};
use common::{AppError, AppResult};
use domain::Student;

#[cfg(test)]
use mockall::automock;

/// Student repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find student by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>>;

    /// Find student by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Student>>;

    /// Find student by linked auth-service account
    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> AppResult<Option<Student>>;

    /// All students, oldest first
    async fn find_all(&self) -> AppResult<Vec<Student>>;

    /// Insert or update the student keyed on its id
    async fn save(&self, student: Student) -> AppResult<Student>;

    /// Remove the student record
    async fn delete(&self, student: &Student) -> AppResult<()>;
}

/// Concrete implementation of StudentRepository
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AppError::storage("find_by_id", id, e))?;

        Ok(result.map(Student::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AppError::storage("find_by_username", username, e))?;

        Ok(result.map(Student::from))
    }

    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::AuthUserId.eq(auth_user_id))
            .one(&self.db)
            .await
            .map_err(|e| AppError::storage("find_by_auth_user_id", auth_user_id, e))?;

        Ok(result.map(Student::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Student>> {
        let models = StudentEntity::find()
            .order_by_asc(student::Column::CreatedAt)
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AppError::storage("find_all", "*", e))?;

        Ok(models.into_iter().map(Student::from).collect())
    }

    async fn save(&self, student: Student) -> AppResult<Student> {
        let active_model = ActiveModel::from(&student);

        StudentEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(student::Column::Id)
                    .update_columns([
                        student::Column::Username,
                        student::Column::PasswordHash,
                        student::Column::AuthUserId,
                        student::Column::TuitionId,
                        student::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                // A concurrent create won the username
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    warn!(username = %student.username, %detail, "Username taken on save");
                    AppError::already_exists("Student")
                }
                _ => AppError::storage("save", student.id.as_str(), e),
            })?;

        Ok(student)
    }

    async fn delete(&self, student: &Student) -> AppResult<()> {
        let result = StudentEntity::delete_by_id(student.id.clone())
            .exec(&self.db)
            .await
            .map_err(|e| AppError::storage("delete", student.id.as_str(), e))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::DatabaseConfig;
    use domain::Password;

    use crate::infra::Database;

    async fn store() -> StudentStore {
        // One pooled connection keeps the in-memory database alive
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        };
        let db = Database::connect(&config).await.unwrap();
        db.ping().await.unwrap();
        StudentStore::new(db.get_connection())
    }

    fn student(id: &str, username: &str, created_secs: i64) -> Student {
        let mut student = Student::new(
            username.to_string(),
            Password::from_hash("hash".to_string()),
            format!("auth-{}", username),
        );
        student.id = id.to_string();
        student.created_at = Utc.timestamp_opt(created_secs, 0).unwrap();
        student.updated_at = student.created_at;
        student
    }

    #[tokio::test]
    async fn test_save_then_find_by_each_key() {
        let store = store().await;
        let saved = store.save(student("sid-1", "alice", 1_700_000_000)).await.unwrap();

        assert_eq!(store.find_by_id("sid-1").await.unwrap(), Some(saved.clone()));
        assert_eq!(store.find_by_username("alice").await.unwrap(), Some(saved.clone()));
        assert_eq!(store.find_by_auth_user_id("auth-alice").await.unwrap(), Some(saved));

        assert_eq!(store.find_by_id("sid-404").await.unwrap(), None);
        assert_eq!(store.find_by_username("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_upserts_on_id() {
        let store = store().await;
        let mut alice = store.save(student("sid-1", "alice", 1_700_000_000)).await.unwrap();

        alice.enroll("tid-1");
        store.save(alice.clone()).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].tuition_id.as_deref(), Some("tid-1"));
        assert_eq!(all[0].created_at, alice.created_at);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_created_at_then_id() {
        let store = store().await;
        assert!(store.find_all().await.unwrap().is_empty());

        store.save(student("sid-c", "carol", 1_700_000_100)).await.unwrap();
        store.save(student("sid-b", "bob", 1_700_000_000)).await.unwrap();
        store.save(student("sid-a", "alice", 1_700_000_000)).await.unwrap();

        let ids: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["sid-a", "sid-b", "sid-c"]);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let store = store().await;
        let alice = store.save(student("sid-1", "alice", 1_700_000_000)).await.unwrap();

        store.delete(&alice).await.unwrap();
        assert_eq!(store.find_by_id("sid-1").await.unwrap(), None);
        assert!(matches!(store.delete(&alice).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_already_exists() {
        let store = store().await;
        store.save(student("sid-1", "alice", 1_700_000_000)).await.unwrap();

        let err = store
            .save(student("sid-2", "alice", 1_700_000_001))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(err.code().code(), 4003);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
