use crate::model::admin::Admin;
use crate::repository::repository_error::{RepositoryResult, RepositoryError};
use crate::util::time::now_timestamp;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::{options::IndexOptions, Collection, Database, IndexModel};
use tracing::{error, info};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the email is taken.
    async fn insert(&self, admin: Admin) -> RepositoryResult<Admin>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>>;
    async fn record_login(&self, id: &ObjectId, at: &str) -> RepositoryResult<()>;
}

pub struct MongoAdminRepository {
    collection: Collection<Admin>,
}

impl MongoAdminRepository {
    pub fn new(db: &Database) -> Self {
        MongoAdminRepository { collection: db.collection::<Admin>("admins") }
    }

    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        info!("Unique index on admins.email ensured");
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for MongoAdminRepository {
    #[tracing::instrument(skip(self, admin), fields(email = %admin.email))]
    async fn insert(&self, mut admin: Admin) -> RepositoryResult<Admin> {
        admin.id = Some(ObjectId::new());
        let now = now_timestamp();
        admin.created_at = Some(now.clone());
        admin.updated_at = Some(now);
        match self.collection.insert_one(&admin, None).await {
            Ok(_) => {
                info!("Admin inserted");
                Ok(admin)
            }
            Err(e) => {
                let err = RepositoryError::from(e);
                error!("Failed to insert admin: {}", err);
                Err(err)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        let filter = doc! { "email": email };
        let admin = self.collection.find_one(filter, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to find admin by email: {}", e)))?;
        Ok(admin)
    }

    async fn record_login(&self, id: &ObjectId, at: &str) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "lastLogin": at, "updatedAt": at } };
        let result = self.collection.update_one(filter, update, None).await
            .map_err(|e| RepositoryError::database(format!("Failed to record admin login: {}", e)))?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!("No admin found for ID: {}", id)));
        }
        Ok(())
    }
}
