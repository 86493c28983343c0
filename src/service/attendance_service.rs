use crate::dto::attendance_dto::NewAttendance;
use crate::model::class_attendance::ClassAttendance;
use crate::repository::attendance_repo::AttendanceRepository;
use crate::repository::lecture_repo::LectureRepository;
use crate::util::error::ServiceError;
use crate::util::time::{now_timestamp, parse_client_date};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

#[async_trait]
pub trait AttendanceService: Send + Sync {
    async fn mark(&self, attendance: NewAttendance) -> Result<ClassAttendance, ServiceError>;
}

pub struct AttendanceServiceImpl {
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub lecture_repo: Arc<dyn LectureRepository>,
}

impl AttendanceServiceImpl {
    pub fn new(attendance_repo: Arc<dyn AttendanceRepository>, lecture_repo: Arc<dyn LectureRepository>) -> Self {
        Self { attendance_repo, lecture_repo }
    }
}

#[async_trait]
impl AttendanceService for AttendanceServiceImpl {
    #[instrument(skip(self, attendance), fields(lecture_id = %attendance.lecture_id))]
    async fn mark(&self, attendance: NewAttendance) -> Result<ClassAttendance, ServiceError> {
        let date = match attendance.date.as_deref() {
            Some(raw) => parse_client_date(raw)
                .ok_or_else(|| ServiceError::InvalidInput(format!("Invalid date: {}", raw)))?,
            None => now_timestamp(),
        };

        self.lecture_repo.get_by_id(attendance.lecture_id).await?;

        let record = self
            .attendance_repo
            .create(ClassAttendance {
                id: None,
                lecture_id: attendance.lecture_id,
                attended_classes: attendance.attended_classes,
                date,
            })
            .await?;
        info!("Attendance marked");
        Ok(record)
    }
}
