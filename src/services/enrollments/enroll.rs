use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::errors::{PortalError, Result};
use crate::models::enrollments::{EnrollResponse, Enrollment};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, load_course};
use crate::storage::Storage;

/// 选课，重复选课返回已有记录且 created 为 false
pub async fn enroll_in_course(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
) -> Result<(Enrollment, bool)> {
    if !user.is_student() {
        return Err(PortalError::authorization("只有学生可以选课"));
    }
    load_course(storage, course_id).await?;

    let (enrollment, created) = storage.enroll_student(user.id, course_id).await?;
    if created {
        tracing::info!("Student {} enrolled in course {}", user.id, course_id);
    }
    Ok((enrollment, created))
}

pub async fn handle_enroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => enroll_in_course(storage.as_ref(), &user, course_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok((enrollment, true)) => Ok(HttpResponse::Created().json(ApiResponse::success(
            EnrollResponse {
                enrollment,
                created: true,
            },
            "选课成功",
        ))),
        Ok((enrollment, false)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollResponse {
                enrollment,
                created: false,
            },
            "已选修该课程",
        ))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::ENROLLMENT)),
    }
}
