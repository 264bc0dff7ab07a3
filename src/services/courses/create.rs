use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode, ResourceCodes, resource_error_response};
use crate::services::access::current_user;
use crate::utils::validate::validate_title;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(e) => return Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    };

    if let Err(msg) = validate_title(&course_data.title, "Course") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::CourseInvalid, msg)));
    }
    course_data.title = course_data.title.trim().to_string();
    course_data.description = course_data
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let storage = service.get_storage(request);

    match storage.create_course(user.id, course_data).await {
        Ok(course) => {
            tracing::info!("Instructor {} created course {}", user.id, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => {
            tracing::error!("Failed to create course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseCreationFailed,
                    "课程创建失败",
                )),
            )
        }
    }
}
