use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::Result;
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::services::contents::remove_stored_file;
use crate::storage::Storage;

/// 删除课程，资料、测验与选课随外键级联删除，随后清理磁盘上的资料文件
pub async fn delete_owned_course(storage: &dyn Storage, user: &User, course_id: i64) -> Result<()> {
    require_course_owner(storage, user, course_id).await?;

    let contents = storage.list_course_contents(course_id).await?;
    storage.delete_course(course_id).await?;

    for content in contents {
        remove_stored_file(&content.file_path);
    }

    tracing::info!("Instructor {} deleted course {}", user.id, course_id);
    Ok(())
}

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => delete_owned_course(storage.as_ref(), &user, course_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("课程已删除"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    }
}
