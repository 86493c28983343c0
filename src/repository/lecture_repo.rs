use crate::model::lecture::{Lecture, LectureUpdate};
use crate::repository::repository_error::{
    RepositoryError, RepositoryResult,
};
use crate::util::time::now_timestamp;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};
use tracing::{info, error};

#[async_trait]
pub trait LectureRepository: Send + Sync {
    async fn create(&self, lecture: Lecture) -> RepositoryResult<Lecture>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Lecture>;
    async fn list(&self) -> RepositoryResult<Vec<Lecture>>;
    async fn update(&self, id: ObjectId, changes: LectureUpdate) -> RepositoryResult<Lecture>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoLectureRepository {
    collection: Collection<Lecture>,
}

impl MongoLectureRepository {
    pub fn new(db: &Database) -> Self {
        MongoLectureRepository { collection: db.collection::<Lecture>("lectures") }
    }
}

#[async_trait]
impl LectureRepository for MongoLectureRepository {

    #[tracing::instrument(skip(self, lecture), fields(class = ?lecture.class_name))]
    async fn create(&self, mut lecture: Lecture) -> RepositoryResult<Lecture> {
        lecture.id = Some(ObjectId::new());
        let now = now_timestamp();
        lecture.created_at = Some(now.clone());
        lecture.updated_at = Some(now);

        let result = self.collection.insert_one(&lecture, None).await;
        match result {
            Ok(_) => {
                info!("Lecture created successfully");
                Ok(lecture)
            },
            Err(e) => {
                error!("Failed to create lecture: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Lecture> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(lecture)) => Ok(lecture),
            Ok(None) => {
                info!("Lecture not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Lecture not found for ID: {}", id)))
            },
            Err(e) => {
                error!("Failed to fetch lecture by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch lecture by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Lecture>> {
        let mut cursor = self.collection.find(None, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to list lectures: {}", e)))?;
        let mut lectures = Vec::new();
        while let Some(lecture) = cursor.next().await {
            match lecture {
                Ok(l) => lectures.push(l),
                Err(e) => {
                    error!("Failed to deserialize lecture: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize lecture: {}", e)));
                }
            }
        }
        info!("Fetched {} lectures", lectures.len());
        Ok(lectures)
    }

    #[tracing::instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: ObjectId, changes: LectureUpdate) -> RepositoryResult<Lecture> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut set = Document::new();
        for (field, value) in changes.changes() {
            set.insert(field, value);
        }
        set.insert("updatedAt", now_timestamp());

        let filter = doc! { "_id": id };
        let update = doc! { "$set": set };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        match self.collection.find_one_and_update(filter, update, options).await {
            Ok(Some(lecture)) => {
                info!("Lecture updated successfully for ID: {}", id);
                Ok(lecture)
            },
            Ok(None) => Err(RepositoryError::not_found(format!("No lecture found to update for ID: {}", id))),
            Err(e) => {
                error!("Failed to update lecture: {}", e);
                Err(RepositoryError::database(format!("Failed to update lecture: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        let result = self.collection.delete_one(filter, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Lecture deleted successfully for ID: {}", id);
                Ok(())
            },
            Ok(_) => Err(RepositoryError::not_found(format!("No lecture found to delete for ID: {}", id))),
            Err(e) => {
                error!("Failed to delete lecture: {}", e);
                Err(RepositoryError::database(format!("Failed to delete lecture: {}", e)))
            }
        }
    }
}
