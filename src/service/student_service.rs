use crate::model::student::Student;
use crate::repository::student_repo::StudentRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

#[async_trait]
pub trait StudentService: Send + Sync {
    async fn login(&self, roll_number: Option<String>, name: Option<String>) -> Result<Student, ServiceError>;
}

pub struct StudentServiceImpl {
    pub student_repo: Arc<dyn StudentRepository>,
}

impl StudentServiceImpl {
    pub fn new(student_repo: Arc<dyn StudentRepository>) -> Self {
        Self { student_repo }
    }
}

#[async_trait]
impl StudentService for StudentServiceImpl {
    #[instrument(skip(self, name))]
    async fn login(&self, roll_number: Option<String>, name: Option<String>) -> Result<Student, ServiceError> {
        let roll_number = roll_number.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let (roll_number, name) = match (roll_number, name) {
            (Some(roll_number), Some(name)) => (roll_number, name),
            _ => return Err(ServiceError::InvalidInput("Roll number and name are required".to_string())),
        };

        let student = self.student_repo.find_or_create(&roll_number, &name).await?;
        info!(roll_number = %student.roll_number, "Student logged in");
        Ok(student)
    }
}
