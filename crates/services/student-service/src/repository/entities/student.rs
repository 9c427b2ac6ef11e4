//! Student database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Student;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub auth_user_id: String,
    /// NULL while the student is not enrolled
    pub tuition_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            auth_user_id: model.auth_user_id,
            tuition_id: model.tuition_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Student> for ActiveModel {
    fn from(student: &Student) -> Self {
        ActiveModel {
            id: Set(student.id.clone()),
            username: Set(student.username.clone()),
            password_hash: Set(student.password_hash.clone()),
            auth_user_id: Set(student.auth_user_id.clone()),
            tuition_id: Set(student.tuition_id.clone()),
            created_at: Set(student.created_at),
            updated_at: Set(student.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::Enrollment;

    #[test]
    fn test_model_to_domain() {
        let now = Utc::now();
        let model = Model {
            id: "sid-1".to_string(),
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            auth_user_id: "auth-1".to_string(),
            tuition_id: Some("tid-1".to_string()),
            created_at: now,
            updated_at: now,
        };

        let student = Student::from(model);
        assert_eq!(student.id, "sid-1");
        assert_eq!(student.enrollment(), Enrollment::Enrolled("tid-1".to_string()));
    }
}
