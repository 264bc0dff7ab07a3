use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, RECENT_COURSE_LIMIT};
use crate::errors::Result;
use crate::models::courses::{CourseListQuery, CourseListResponse, CourseQueryParams};
use crate::models::users::User;
use crate::models::{ApiResponse, error_response};
use crate::services::access::current_user;
use crate::storage::Storage;

/// 讲师只能看到自己开设的课程
pub async fn course_catalog(
    storage: &dyn Storage,
    user: &User,
    query: CourseQueryParams,
) -> Result<CourseListResponse> {
    let list_query = CourseListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        instructor_id: user.is_instructor().then_some(user.id),
        search: query.search,
    };

    storage.list_courses_with_pagination(list_query).await
}

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => course_catalog(storage.as_ref(), &user, query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取课程列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_recent_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_recent_courses(RECENT_COURSE_LIMIT).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(courses, "获取最新课程成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}
