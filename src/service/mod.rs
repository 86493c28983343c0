pub mod admin_service;
pub mod student_service;
pub mod lecture_request_service;
pub mod lecture_service;
pub mod attendance_service;
