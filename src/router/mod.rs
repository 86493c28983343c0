pub mod admin_router;
pub mod student_router;
pub mod lecture_request_router;
pub mod lecture_router;
pub mod attendance_router;
