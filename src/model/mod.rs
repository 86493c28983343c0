pub mod admin;
pub mod student;
pub mod lecture_request;
pub mod lecture;
pub mod class_attendance;
