use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    #[default]
    Add,
    Edit,
    Other,
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "add" => Ok(RequestType::Add),
            "edit" => Ok(RequestType::Edit),
            "other" => Ok(RequestType::Other),
            other => Err(format!("Unknown lecture request type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [RequestStatus::Pending, RequestStatus::Approved, RequestStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Pending moves to either decision; a decision may only be re-applied.
    pub fn can_become(&self, next: RequestStatus) -> bool {
        match (self, next) {
            (_, RequestStatus::Pending) => false,
            (RequestStatus::Pending, _) => true,
            (current, next) => *current == next,
        }
    }

    /// Every status a request may be in for `next` to be applied.
    pub fn sources_of(next: RequestStatus) -> Vec<RequestStatus> {
        Self::ALL.into_iter().filter(|status| status.can_become(next)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub student_roll_number: String,
    #[serde(rename = "type", default)]
    pub request_type: RequestType,
    pub lecture_title: String,
    pub lecture_date: String,
    pub description: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub admin_comments: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
