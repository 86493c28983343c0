use tracing::{info, warn, error, instrument};
use crate::dto::lecture_request_dto::SubmitLectureRequest;
use crate::model::lecture_request::{LectureRequest, RequestStatus, RequestType};
use crate::repository::lecture_request_repo::LectureRequestRepository;
use crate::util::error::ServiceError;
use crate::util::time::parse_client_date;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

#[async_trait]
pub trait LectureRequestService: Send + Sync {
    async fn submit(&self, request: SubmitLectureRequest) -> Result<LectureRequest, ServiceError>;
    async fn list(&self) -> Result<Vec<LectureRequest>, ServiceError>;
    async fn approve(&self, id: ObjectId, admin_comments: Option<String>) -> Result<LectureRequest, ServiceError>;
    async fn reject(&self, id: ObjectId, admin_comments: Option<String>) -> Result<LectureRequest, ServiceError>;
}

pub struct LectureRequestServiceImpl {
    pub request_repo: Arc<dyn LectureRequestRepository>,
}

impl LectureRequestServiceImpl {
    pub fn new(request_repo: Arc<dyn LectureRequestRepository>) -> Self {
        Self { request_repo }
    }

    async fn decide(
        &self,
        id: ObjectId,
        decision: RequestStatus,
        admin_comments: Option<String>,
    ) -> Result<LectureRequest, ServiceError> {
        let comments = admin_comments.unwrap_or_default();
        let allowed_from = RequestStatus::sources_of(decision);

        if let Some(updated) = self.request_repo.set_status(id, &allowed_from, decision, &comments).await? {
            info!(status = decision.as_str(), "Lecture request decided");
            return Ok(updated);
        }

        // The conditional update matched nothing: either the id is unknown
        // or the request already carries the opposite decision.
        let current = self.request_repo.get_by_id(id).await?;
        warn!(
            current = current.status.as_str(),
            requested = decision.as_str(),
            "Refusing to change a decided lecture request"
        );
        Err(ServiceError::Conflict(format!(
            "Lecture request is already {}",
            current.status.as_str()
        )))
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[async_trait]
impl LectureRequestService for LectureRequestServiceImpl {
    #[instrument(skip(self, request))]
    async fn submit(&self, request: SubmitLectureRequest) -> Result<LectureRequest, ServiceError> {
        let (student_roll_number, lecture_title, lecture_date, description) = match (
            required(request.student_roll_number),
            required(request.lecture_title),
            required(request.lecture_date),
            required(request.description),
        ) {
            (Some(roll), Some(title), Some(date), Some(description)) => (roll, title, date, description),
            _ => return Err(ServiceError::InvalidInput("Missing required fields".to_string())),
        };

        let request_type = match required(request.request_type) {
            Some(raw) => raw.parse::<RequestType>().map_err(ServiceError::InvalidInput)?,
            None => RequestType::default(),
        };

        let lecture_date = parse_client_date(&lecture_date)
            .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid lectureDate: {}", lecture_date)))?;

        let new_request = LectureRequest {
            id: None,
            student_roll_number,
            request_type,
            lecture_title,
            lecture_date,
            description,
            status: RequestStatus::Pending,
            admin_comments: String::new(),
            created_at: None,
            updated_at: None,
        };

        let created = self.request_repo.create(new_request).await?;
        info!("Lecture request submitted");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<LectureRequest>, ServiceError> {
        let res = self.request_repo.list_newest_first().await;
        match &res {
            Ok(requests) => info!("Fetched {} lecture requests", requests.len()),
            Err(e) => error!("Failed to list lecture requests: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, admin_comments), fields(id = %id))]
    async fn approve(&self, id: ObjectId, admin_comments: Option<String>) -> Result<LectureRequest, ServiceError> {
        self.decide(id, RequestStatus::Approved, admin_comments).await
    }

    #[instrument(skip(self, admin_comments), fields(id = %id))]
    async fn reject(&self, id: ObjectId, admin_comments: Option<String>) -> Result<LectureRequest, ServiceError> {
        self.decide(id, RequestStatus::Rejected, admin_comments).await
    }
}
