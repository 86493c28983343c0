pub mod repository_error;
pub mod mongo_store;
pub mod admin_repo;
pub mod student_repo;
pub mod lecture_request_repo;
pub mod lecture_repo;
pub mod attendance_repo;
