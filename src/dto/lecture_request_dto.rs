use crate::model::lecture_request::{LectureRequest, RequestStatus, RequestType};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/lecture-requests`; presence is checked by the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLectureRequest {
    pub student_roll_number: Option<String>,
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    pub lecture_title: Option<String>,
    pub lecture_date: Option<String>,
    pub description: Option<String>,
}

/// Body of the approve and reject routes; the body itself may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub admin_comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRequestResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_roll_number: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub lecture_title: String,
    pub lecture_date: String,
    pub description: String,
    pub status: RequestStatus,
    pub admin_comments: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<LectureRequest> for LectureRequestResponse {
    fn from(request: LectureRequest) -> Self {
        LectureRequestResponse {
            id: request.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_roll_number: request.student_roll_number,
            request_type: request.request_type,
            lecture_title: request.lecture_title,
            lecture_date: request.lecture_date,
            description: request.description,
            status: request.status,
            admin_comments: request.admin_comments,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}
