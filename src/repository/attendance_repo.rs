use crate::model::class_attendance::ClassAttendance;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database, IndexModel};
use std::collections::HashSet;
use tracing::{error, info};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, record: ClassAttendance) -> RepositoryResult<ClassAttendance>;
    async fn find_by_lecture(&self, lecture_id: ObjectId) -> RepositoryResult<Vec<ClassAttendance>>;
    /// Ids of every lecture with at least one attendance record.
    async fn marked_lecture_ids(&self) -> RepositoryResult<HashSet<ObjectId>>;
}

pub struct MongoAttendanceRepository {
    collection: Collection<ClassAttendance>,
}

impl MongoAttendanceRepository {
    pub fn new(db: &Database) -> Self {
        MongoAttendanceRepository { collection: db.collection::<ClassAttendance>("class_attendances") }
    }

    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder().keys(doc! { "lectureId": 1 }).build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for MongoAttendanceRepository {
    #[tracing::instrument(skip(self, record), fields(lecture_id = %record.lecture_id))]
    async fn create(&self, mut record: ClassAttendance) -> RepositoryResult<ClassAttendance> {
        record.id = Some(ObjectId::new());
        match self.collection.insert_one(&record, None).await {
            Ok(_) => {
                info!("Attendance recorded for {} classes", record.attended_classes.len());
                Ok(record)
            }
            Err(e) => {
                error!("Failed to record attendance: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(lecture_id = %lecture_id))]
    async fn find_by_lecture(&self, lecture_id: ObjectId) -> RepositoryResult<Vec<ClassAttendance>> {
        let filter = doc! { "lectureId": lecture_id };
        let cursor = self.collection.find(filter, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to find attendance records: {}", e)))?;
        cursor.try_collect().await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read attendance records: {}", e)))
    }

    async fn marked_lecture_ids(&self) -> RepositoryResult<HashSet<ObjectId>> {
        let values = self.collection.distinct("lectureId", None, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to collect marked lectures: {}", e)))?;
        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::ObjectId(id) => Some(id),
                _ => None,
            })
            .collect())
    }
}
