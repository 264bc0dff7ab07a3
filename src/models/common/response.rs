use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::PortalError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 各资源细化后的错误码
#[derive(Debug, Clone, Copy)]
pub struct ResourceCodes {
    pub not_found: ErrorCode,
    pub forbidden: ErrorCode,
    pub invalid: ErrorCode,
}

impl ResourceCodes {
    pub const GENERIC: Self = Self {
        not_found: ErrorCode::NotFound,
        forbidden: ErrorCode::Forbidden,
        invalid: ErrorCode::BadRequest,
    };
    pub const COURSE: Self = Self {
        not_found: ErrorCode::CourseNotFound,
        forbidden: ErrorCode::CoursePermissionDenied,
        invalid: ErrorCode::CourseInvalid,
    };
    pub const ENROLLMENT: Self = Self {
        not_found: ErrorCode::CourseNotFound,
        forbidden: ErrorCode::EnrollmentNotAllowed,
        invalid: ErrorCode::BadRequest,
    };
    pub const CONTENT: Self = Self {
        not_found: ErrorCode::ContentNotFound,
        forbidden: ErrorCode::CoursePermissionDenied,
        invalid: ErrorCode::BadRequest,
    };
    pub const QUIZ: Self = Self {
        not_found: ErrorCode::QuizNotFound,
        forbidden: ErrorCode::QuizPermissionDenied,
        invalid: ErrorCode::QuizInvalid,
    };
    pub const ATTEMPT: Self = Self {
        not_found: ErrorCode::AttemptNotFound,
        forbidden: ErrorCode::AttemptPermissionDenied,
        invalid: ErrorCode::BadRequest,
    };
}

/// 将领域错误转换为 HTTP 响应
///
/// 内部错误统一记录日志，业务错误直接把消息返回给调用方。
pub fn error_response(err: &PortalError) -> HttpResponse {
    resource_error_response(err, ResourceCodes::GENERIC)
}

pub fn resource_error_response(err: &PortalError, codes: ResourceCodes) -> HttpResponse {
    let code = match err {
        PortalError::NotFound(_) => codes.not_found,
        PortalError::Authorization(_) => codes.forbidden,
        PortalError::Authentication(_) => ErrorCode::Unauthorized,
        PortalError::Validation(_) => codes.invalid,
        PortalError::Conflict(_) => ErrorCode::Conflict,
        _ => ErrorCode::InternalServerError,
    };

    if !err.is_client_error() {
        tracing::error!("{}", err);
    }

    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_response_status() {
        let resp = error_response(&PortalError::authorization("Not enrolled in this course"));
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = error_response(&PortalError::not_found("Quiz not found"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = error_response(&PortalError::database_operation("disk full"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_resource_codes_refine_client_errors() {
        let resp = resource_error_response(&PortalError::not_found("missing"), ResourceCodes::QUIZ);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = resource_error_response(&PortalError::authorization("no"), ResourceCodes::ATTEMPT);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 认证错误不随资源变化
        let resp = resource_error_response(&PortalError::authentication("login"), ResourceCodes::COURSE);
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(3_i32, "ok");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data, Some(3));

        let empty = ApiResponse::error_empty(ErrorCode::QuizNotFound, "missing");
        assert_eq!(empty.code, ErrorCode::QuizNotFound as i32);
        assert!(empty.data.is_none());
    }
}
