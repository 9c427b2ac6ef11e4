//! Student service - orchestrates the store and the peer services.
//!
//! Every operation runs sequentially on the calling task. Downstream failures
//! abort the operation immediately; nothing is retried or rolled back.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use common::{AppError, AppResult, OptionExt};
use domain::{CreateStudent, Enrollment, Password, Student};

use crate::clients::{AuthServiceClient, AuthToken, PaymentServiceClient, TuitionServiceClient};
use crate::repository::StudentRepository;

/// Student service trait for dependency injection.
#[async_trait]
pub trait StudentService: Send + Sync {
    /// Register the student with the auth service, then persist it
    async fn create_student(&self, request: CreateStudent, token: &AuthToken)
        -> AppResult<Student>;

    async fn find_by_id(&self, id: &str) -> AppResult<Student>;

    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> AppResult<Student>;

    /// All students, oldest first
    async fn get_all(&self) -> AppResult<Vec<Student>>;

    /// Payment, then tuition, then auth, then the local record
    async fn delete_student(&self, student: Student, token: &AuthToken) -> AppResult<()>;

    /// Attach the tuition; callers check the student is not enrolled
    async fn add_tuition(&self, student: Student, tuition_id: &str) -> AppResult<Student>;

    async fn remove_tuition(&self, student: Student) -> AppResult<Student>;
}

/// Concrete implementation of StudentService.
pub struct StudentManager {
    repo: Arc<dyn StudentRepository>,
    auth: Arc<dyn AuthServiceClient>,
    tuition: Arc<dyn TuitionServiceClient>,
    payment: Arc<dyn PaymentServiceClient>,
}

impl StudentManager {
    pub fn new(
        repo: Arc<dyn StudentRepository>,
        auth: Arc<dyn AuthServiceClient>,
        tuition: Arc<dyn TuitionServiceClient>,
        payment: Arc<dyn PaymentServiceClient>,
    ) -> Self {
        Self {
            repo,
            auth,
            tuition,
            payment,
        }
    }
}

#[async_trait]
impl StudentService for StudentManager {
    async fn create_student(
        &self,
        request: CreateStudent,
        token: &AuthToken,
    ) -> AppResult<Student> {
        request.check_required()?;

        if self.repo.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::already_exists("Student"));
        }

        let password = Password::new(&request.password)?;
        let auth_user_id = self
            .auth
            .register_user(&request.username, &request.password, request.role, token)
            .await?;

        let student = Student::new(request.username, password, auth_user_id);
        match self.repo.save(student).await {
            Ok(saved) => {
                debug!(student_id = %saved.id, "Created student");
                Ok(saved)
            }
            Err(e) => {
                // The auth account registered above is left behind.
                error!(error = %e, "Saving student failed after auth registration");
                Err(e)
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Student> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> AppResult<Student> {
        self.repo
            .find_by_auth_user_id(auth_user_id)
            .await?
            .ok_or_not_found()
    }

    async fn get_all(&self) -> AppResult<Vec<Student>> {
        self.repo.find_all().await
    }

    async fn delete_student(&self, student: Student, token: &AuthToken) -> AppResult<()> {
        self.payment.delete_by_student_id(&student.id).await?;

        if let Enrollment::Enrolled(tuition_id) = student.enrollment() {
            self.tuition.remove_student(&student.id, &tuition_id).await?;
        }

        self.auth.delete_user(&student.auth_user_id, token).await?;
        self.repo.delete(&student).await?;

        debug!(student_id = %student.id, "Deleted student");
        Ok(())
    }

    async fn add_tuition(&self, mut student: Student, tuition_id: &str) -> AppResult<Student> {
        student.enroll(tuition_id);
        self.repo.save(student).await
    }

    async fn remove_tuition(&self, mut student: Student) -> AppResult<Student> {
        student.unenroll();
        self.repo.save(student).await
    }
}
