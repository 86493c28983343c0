use crate::model::lecture_request::{LectureRequest, RequestStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_timestamp;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::{error, info};

#[async_trait]
pub trait LectureRequestRepository: Send + Sync {
    async fn create(&self, request: LectureRequest) -> RepositoryResult<LectureRequest>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<LectureRequest>;
    /// All requests, newest `createdAt` first.
    async fn list_newest_first(&self) -> RepositoryResult<Vec<LectureRequest>>;
    /// Sets `status` and `admin_comments` only while the stored status is one
    /// of `allowed_from`; `None` means no document matched that condition.
    async fn set_status(
        &self,
        id: ObjectId,
        allowed_from: &[RequestStatus],
        status: RequestStatus,
        admin_comments: &str,
    ) -> RepositoryResult<Option<LectureRequest>>;
}

pub struct MongoLectureRequestRepository {
    collection: Collection<LectureRequest>,
}

impl MongoLectureRequestRepository {
    pub fn new(db: &Database) -> Self {
        MongoLectureRequestRepository { collection: db.collection::<LectureRequest>("lecture_requests") }
    }

    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder().keys(doc! { "createdAt": -1 }).build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }
}

#[async_trait]
impl LectureRequestRepository for MongoLectureRequestRepository {
    #[tracing::instrument(skip(self, request), fields(roll_number = %request.student_roll_number))]
    async fn create(&self, mut request: LectureRequest) -> RepositoryResult<LectureRequest> {
        request.id = Some(ObjectId::new());
        let now = now_timestamp();
        request.created_at = Some(now.clone());
        request.updated_at = Some(now);

        match self.collection.insert_one(&request, None).await {
            Ok(_) => {
                info!("Lecture request created");
                Ok(request)
            }
            Err(e) => {
                error!("Failed to create lecture request: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<LectureRequest> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(request)) => Ok(request),
            Ok(None) => Err(RepositoryError::not_found(format!("Lecture request not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch lecture request: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch lecture request by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_newest_first(&self) -> RepositoryResult<Vec<LectureRequest>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(None, options).await
            .map_err(|e| RepositoryError::database(format!("Failed to list lecture requests: {}", e)))?;
        let requests: Vec<LectureRequest> = cursor.try_collect().await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read lecture requests: {}", e)))?;
        info!("Fetched {} lecture requests", requests.len());
        Ok(requests)
    }

    #[tracing::instrument(skip(self, admin_comments), fields(id = %id, status = status.as_str()))]
    async fn set_status(
        &self,
        id: ObjectId,
        allowed_from: &[RequestStatus],
        status: RequestStatus,
        admin_comments: &str,
    ) -> RepositoryResult<Option<LectureRequest>> {
        let allowed: Vec<&str> = allowed_from.iter().map(RequestStatus::as_str).collect();
        let filter = doc! { "_id": id, "status": { "$in": allowed } };
        let update = doc! {
            "$set": {
                "status": status.as_str(),
                "adminComments": admin_comments,
                "updatedAt": now_timestamp(),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self.collection.find_one_and_update(filter, update, options).await
            .map_err(|e| RepositoryError::database(format!("Failed to update lecture request status: {}", e)))?;
        Ok(updated)
    }
}
