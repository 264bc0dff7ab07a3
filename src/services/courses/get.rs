use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::Result;
use crate::models::courses::CourseDetailResponse;
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, load_course};
use crate::storage::Storage;

pub async fn course_detail(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
) -> Result<CourseDetailResponse> {
    let course = load_course(storage, course_id).await?;
    let contents = storage.list_course_contents(course_id).await?;
    let quizzes = storage.list_course_quizzes(course_id).await?;

    let enrolled = user.is_student() && storage.get_enrollment(user.id, course_id).await?.is_some();
    let is_owner = course.instructor_id == user.id;

    Ok(CourseDetailResponse {
        course,
        contents,
        quizzes,
        enrolled,
        is_owner,
    })
}

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => course_detail(storage.as_ref(), &user, course_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "获取课程详情成功"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    }
}
