#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use lecturehub_backend::app::app::{build_router, AppRepositories, AppServices};
use lecturehub_backend::config::JwtConfig;
use lecturehub_backend::model::admin::Admin;
use lecturehub_backend::model::class_attendance::ClassAttendance;
use lecturehub_backend::model::lecture::{Lecture, LectureUpdate};
use lecturehub_backend::model::lecture_request::{LectureRequest, RequestStatus};
use lecturehub_backend::model::student::Student;
use lecturehub_backend::repository::admin_repo::AdminRepository;
use lecturehub_backend::repository::attendance_repo::AttendanceRepository;
use lecturehub_backend::repository::lecture_repo::LectureRepository;
use lecturehub_backend::repository::lecture_request_repo::LectureRequestRepository;
use lecturehub_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use lecturehub_backend::repository::student_repo::StudentRepository;
use lecturehub_backend::util::time::now_timestamp;
use lecturehub_backend::util::upload::LocalFileStorage;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt; // for .oneshot()

/// Initialize tracing for tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    pub admins: Mutex<Vec<Admin>>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn insert(&self, mut admin: Admin) -> RepositoryResult<Admin> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.email == admin.email) {
            return Err(RepositoryError::already_exists("E11000 duplicate key error: email"));
        }
        admin.id = Some(ObjectId::new());
        admin.created_at = Some(now_timestamp());
        admin.updated_at = admin.created_at.clone();
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        Ok(self.admins.lock().unwrap().iter().find(|a| a.email == email).cloned())
    }

    async fn record_login(&self, id: &ObjectId, at: &str) -> RepositoryResult<()> {
        let mut admins = self.admins.lock().unwrap();
        match admins.iter_mut().find(|a| a.id.as_ref() == Some(id)) {
            Some(admin) => {
                admin.last_login = Some(at.to_string());
                Ok(())
            }
            None => Err(RepositoryError::not_found("admin")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    pub students: Mutex<Vec<Student>>,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_or_create(&self, roll_number: &str, name: &str) -> RepositoryResult<Student> {
        let mut students = self.students.lock().unwrap();
        if let Some(existing) = students.iter().find(|s| s.roll_number == roll_number) {
            return Ok(existing.clone());
        }
        let student = Student {
            id: Some(ObjectId::new()),
            roll_number: roll_number.to_string(),
            name: name.to_string(),
            created_at: Some(now_timestamp()),
        };
        students.push(student.clone());
        Ok(student)
    }
}

#[derive(Default)]
pub struct InMemoryLectureRequestRepository {
    pub requests: Mutex<Vec<LectureRequest>>,
}

#[async_trait]
impl LectureRequestRepository for InMemoryLectureRequestRepository {
    async fn create(&self, mut request: LectureRequest) -> RepositoryResult<LectureRequest> {
        request.id = Some(ObjectId::new());
        request.created_at = Some(now_timestamp());
        request.updated_at = request.created_at.clone();
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<LectureRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Lecture request not found for ID: {}", id)))
    }

    async fn list_newest_first(&self) -> RepositoryResult<Vec<LectureRequest>> {
        // Later inserts win ties on equal millisecond timestamps.
        let mut requests: Vec<LectureRequest> = self.requests.lock().unwrap().iter().rev().cloned().collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn set_status(
        &self,
        id: ObjectId,
        allowed_from: &[RequestStatus],
        status: RequestStatus,
        admin_comments: &str,
    ) -> RepositoryResult<Option<LectureRequest>> {
        let mut requests = self.requests.lock().unwrap();
        let Some(request) = requests
            .iter_mut()
            .find(|r| r.id == Some(id) && allowed_from.contains(&r.status))
        else {
            return Ok(None);
        };
        request.status = status;
        request.admin_comments = admin_comments.to_string();
        request.updated_at = Some(now_timestamp());
        Ok(Some(request.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryLectureRepository {
    pub lectures: Mutex<Vec<Lecture>>,
    /// Makes every write fail, for exercising upload cleanup.
    pub fail_writes: Mutex<bool>,
}

impl InMemoryLectureRepository {
    fn check_writable(&self) -> RepositoryResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(RepositoryError::database("simulated write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl LectureRepository for InMemoryLectureRepository {
    async fn create(&self, mut lecture: Lecture) -> RepositoryResult<Lecture> {
        self.check_writable()?;
        lecture.id = Some(ObjectId::new());
        lecture.created_at = Some(now_timestamp());
        lecture.updated_at = lecture.created_at.clone();
        self.lectures.lock().unwrap().push(lecture.clone());
        Ok(lecture)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Lecture> {
        self.lectures
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Lecture not found for ID: {}", id)))
    }

    async fn list(&self) -> RepositoryResult<Vec<Lecture>> {
        Ok(self.lectures.lock().unwrap().clone())
    }

    async fn update(&self, id: ObjectId, changes: LectureUpdate) -> RepositoryResult<Lecture> {
        self.check_writable()?;
        let mut lectures = self.lectures.lock().unwrap();
        let lecture = lectures
            .iter_mut()
            .find(|l| l.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No lecture found to update for ID: {}", id)))?;
        if !changes.is_empty() {
            changes.apply_to(lecture);
            lecture.updated_at = Some(now_timestamp());
        }
        Ok(lecture.clone())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut lectures = self.lectures.lock().unwrap();
        let before = lectures.len();
        lectures.retain(|l| l.id != Some(id));
        if lectures.len() == before {
            return Err(RepositoryError::not_found(format!("No lecture found to delete for ID: {}", id)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    pub records: Mutex<Vec<ClassAttendance>>,
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn create(&self, mut record: ClassAttendance) -> RepositoryResult<ClassAttendance> {
        record.id = Some(ObjectId::new());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_lecture(&self, lecture_id: ObjectId) -> RepositoryResult<Vec<ClassAttendance>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.lecture_id == lecture_id)
            .cloned()
            .collect())
    }

    async fn marked_lecture_ids(&self) -> RepositoryResult<HashSet<ObjectId>> {
        Ok(self.records.lock().unwrap().iter().map(|r| r.lecture_id).collect())
    }
}

/// Full router over in-memory repositories and a temporary upload directory.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
    pub admins: Arc<InMemoryAdminRepository>,
    pub students: Arc<InMemoryStudentRepository>,
    pub lecture_requests: Arc<InMemoryLectureRequestRepository>,
    pub lectures: Arc<InMemoryLectureRepository>,
    pub attendance: Arc<InMemoryAttendanceRepository>,
    pub services: AppServices,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_jwt(JwtConfig::default()).await
}

pub async fn spawn_app_with_jwt(jwt_config: JwtConfig) -> TestApp {
    init_tracing();
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let storage = Arc::new(LocalFileStorage::new(upload_dir.path()).await.expect("upload storage"));

    let admins = Arc::new(InMemoryAdminRepository::default());
    let students = Arc::new(InMemoryStudentRepository::default());
    let lecture_requests = Arc::new(InMemoryLectureRequestRepository::default());
    let lectures = Arc::new(InMemoryLectureRepository::default());
    let attendance = Arc::new(InMemoryAttendanceRepository::default());

    let repos = AppRepositories {
        admin_repo: admins.clone(),
        student_repo: students.clone(),
        lecture_request_repo: lecture_requests.clone(),
        lecture_repo: lectures.clone(),
        attendance_repo: attendance.clone(),
    };
    let services = AppServices::new(repos, jwt_config, storage);
    let router = build_router(&services, upload_dir.path(), 10 * 1024 * 1024);

    TestApp {
        router,
        upload_dir,
        admins,
        students,
        lecture_requests,
        lectures,
        attendance,
        services,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body_bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap(); // 1 MB limit
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn multipart(&self, method: &str, uri: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let (content_type, body) = multipart_body(parts);
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    /// Registers `email`/`password` and returns a bearer token for it.
    pub async fn admin_token(&self, email: &str, password: &str) -> String {
        let creds = serde_json::json!({ "email": email, "password": password });
        let (status, _) = self.json("POST", "/api/admin/register", Some(creds.clone()), None).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.json("POST", "/api/admin/login", Some(creds), None).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token missing").to_string()
    }

    pub fn stored_uploads(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File { name: &'a str, filename: &'a str, content: &'a [u8] },
}

const BOUNDARY: &str = "X-LECTUREHUB-BOUNDARY";

pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
                body.extend_from_slice(value.as_bytes());
            }
            Part::File { name, filename, content } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
