use crate::model::admin::Admin;
use crate::model::student::Student;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the admin register and login routes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminCredentialsRequest {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1, max = 128))]
    pub password: Option<String>,
}

impl AdminCredentialsRequest {
    /// Strips surrounding whitespace from the email; the password is kept as sent.
    pub fn trimmed(self) -> Self {
        AdminCredentialsRequest {
            email: self.email.map(|email| email.trim().to_string()),
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id: String,
    pub email: String,
}

impl From<Admin> for AdminSummary {
    fn from(admin: Admin) -> Self {
        AdminSummary {
            id: admin.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: admin.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoginRequest {
    pub roll_number: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: String,
    pub roll_number: String,
    pub name: String,
}

impl From<Student> for StudentSummary {
    fn from(student: Student) -> Self {
        StudentSummary {
            id: student.id.map(|id| id.to_hex()).unwrap_or_default(),
            roll_number: student.roll_number,
            name: student.name,
        }
    }
}
