//! 数据模型定义
//!
//! - `entities`: 业务实体（由 storage 层从数据库实体转换而来）
//! - `requests`: HTTP 请求体 / 查询参数
//! - `responses`: HTTP 响应体

pub mod attempts;
pub mod auth;
pub mod common;
pub mod contents;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod quizzes;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, PaginationInfo, PaginationQuery, ResourceCodes, error_response,
    resource_error_response,
};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
