use crate::dto::lecture_dto::{ClassSummary, LectureForm, LectureResponse};
use crate::model::lecture::{Lecture, LectureUpdate};
use crate::repository::attendance_repo::AttendanceRepository;
use crate::repository::lecture_repo::LectureRepository;
use crate::util::error::ServiceError;
use crate::util::time::parse_client_date;
use crate::util::upload::{FileStorage, UploadedFile};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

#[async_trait]
pub trait LectureService: Send + Sync {
    async fn create(&self, form: LectureForm) -> Result<Lecture, ServiceError>;
    /// Every lecture, flagged with whether attendance was marked for it.
    async fn list(&self) -> Result<Vec<LectureResponse>, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Lecture, ServiceError>;
    async fn update(&self, id: ObjectId, form: LectureForm) -> Result<Lecture, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn list_classes(&self, exclude_attended_for: Option<ObjectId>) -> Result<Vec<ClassSummary>, ServiceError>;
}

pub struct LectureServiceImpl {
    pub lecture_repo: Arc<dyn LectureRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub storage: Arc<dyn FileStorage>,
}

impl LectureServiceImpl {
    pub fn new(
        lecture_repo: Arc<dyn LectureRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self { lecture_repo, attendance_repo, storage }
    }

    /// Validates the form and writes its files; returns the changes to persist
    /// together with the names of the files written.
    async fn prepare(&self, form: LectureForm) -> Result<(LectureUpdate, Vec<String>), ServiceError> {
        let LectureForm { mut fields, images, banner } = form;

        fields.date = match fields.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                parse_client_date(raw)
                    .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid date: {}", raw)))?,
            ),
        };

        let mut stored = Vec::new();
        if let Some(file) = images {
            let name = self.store_or_rollback(&file, &stored).await?;
            stored.push(name.clone());
            fields.images = Some(name);
        }
        if let Some(file) = banner {
            let name = self.store_or_rollback(&file, &stored).await?;
            stored.push(name.clone());
            fields.banner = Some(name);
        }
        Ok((fields, stored))
    }

    async fn store_or_rollback(&self, file: &UploadedFile, stored: &[String]) -> Result<String, ServiceError> {
        match self.storage.store(file).await {
            Ok(name) => Ok(name),
            Err(e) => {
                error!("Failed to store upload {}: {}", file.original_name, e);
                self.discard(stored).await;
                Err(ServiceError::InternalError(format!("Failed to store upload: {}", e)))
            }
        }
    }

    /// Best effort removal of uploads whose lecture was never saved.
    async fn discard(&self, stored: &[String]) {
        for name in stored {
            if let Err(e) = self.storage.remove(name).await {
                warn!("Failed to remove orphaned upload {}: {}", name, e);
            }
        }
    }
}

#[async_trait]
impl LectureService for LectureServiceImpl {
    #[instrument(skip(self, form))]
    async fn create(&self, form: LectureForm) -> Result<Lecture, ServiceError> {
        let (fields, stored) = self.prepare(form).await?;
        let mut lecture = Lecture::default();
        fields.apply_to(&mut lecture);

        match self.lecture_repo.create(lecture).await {
            Ok(lecture) => {
                info!(uploads = stored.len(), "Lecture created");
                Ok(lecture)
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<LectureResponse>, ServiceError> {
        let lectures = self.lecture_repo.list().await?;
        let marked = self.attendance_repo.marked_lecture_ids().await?;
        Ok(lectures
            .into_iter()
            .map(|lecture| {
                let attendance_marked = lecture.id.map_or(false, |id| marked.contains(&id));
                LectureResponse::with_attendance(lecture, attendance_marked)
            })
            .collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: ObjectId) -> Result<Lecture, ServiceError> {
        self.lecture_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self, form), fields(id = %id))]
    async fn update(&self, id: ObjectId, form: LectureForm) -> Result<Lecture, ServiceError> {
        let (changes, stored) = self.prepare(form).await?;
        match self.lecture_repo.update(id, changes).await {
            Ok(lecture) => {
                info!(uploads = stored.len(), "Lecture updated");
                Ok(lecture)
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.lecture_repo.delete(id).await?;
        info!("Lecture deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_classes(&self, exclude_attended_for: Option<ObjectId>) -> Result<Vec<ClassSummary>, ServiceError> {
        let Some(lecture_id) = exclude_attended_for else {
            let mut classes: BTreeMap<String, String> = BTreeMap::new();
            for lecture in self.lecture_repo.list().await? {
                let (Some(id), Some(name)) = (lecture.id, lecture.class_name) else {
                    continue;
                };
                if name.trim().is_empty() {
                    continue;
                }
                classes.entry(name).or_insert_with(|| id.to_hex());
            }
            return Ok(classes
                .into_iter()
                .map(|(name, id)| ClassSummary { id, name })
                .collect());
        };

        let lecture = self.lecture_repo.get_by_id(lecture_id).await?;
        let class_name = match lecture.class_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => name,
            None => return Ok(Vec::new()),
        };

        let lecture_hex = lecture_id.to_hex();
        let records = self.attendance_repo.find_by_lecture(lecture_id).await?;
        let already_marked = records
            .iter()
            .flat_map(|record| record.attended_classes.iter())
            .any(|class_ref| *class_ref == class_name || *class_ref == lecture_hex);

        if already_marked {
            info!("Class {} already marked for lecture", class_name);
            return Ok(Vec::new());
        }
        Ok(vec![ClassSummary { id: lecture_hex, name: class_name }])
    }
}
