use crate::model::student::Student;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_timestamp;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::{
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::{debug, info, warn};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Returns the student with `roll_number`, inserting it with `name` if absent.
    async fn find_or_create(&self, roll_number: &str, name: &str) -> RepositoryResult<Student>;
}

pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        MongoStudentRepository { collection: db.collection::<Student>("students") }
    }

    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "rollNumber": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        info!("Unique index on students.rollNumber ensured");
        Ok(())
    }

    async fn upsert(&self, roll_number: &str, name: &str) -> RepositoryResult<Option<Student>> {
        let filter = doc! { "rollNumber": roll_number };
        let update = doc! {
            "$setOnInsert": {
                "_id": ObjectId::new(),
                "rollNumber": roll_number,
                "name": name,
                "createdAt": now_timestamp(),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        Ok(self.collection.find_one_and_update(filter, update, options).await?)
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    #[tracing::instrument(skip(self, name))]
    async fn find_or_create(&self, roll_number: &str, name: &str) -> RepositoryResult<Student> {
        let student = match self.upsert(roll_number, name).await {
            Ok(student) => student,
            // Two concurrent first logins: the loser of the upsert race hits
            // the unique index and the winner's document is now readable.
            Err(RepositoryError::AlreadyExists(_)) => {
                warn!("Concurrent student upsert detected, retrying");
                self.upsert(roll_number, name).await?
            }
            Err(e) => return Err(e),
        };
        debug!("Student resolved");
        student.ok_or_else(|| {
            RepositoryError::database(format!("Upsert returned no student for roll number {}", roll_number))
        })
    }
}
