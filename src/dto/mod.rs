pub mod auth_dto;
pub mod lecture_request_dto;
pub mod lecture_dto;
pub mod attendance_dto;
