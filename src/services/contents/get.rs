use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::errors::{PortalError, Result};
use crate::models::contents::Content;
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_member};
use crate::storage::Storage;

/// 资料存在且当前用户是所属课程的成员
pub async fn accessible_content(
    storage: &dyn Storage,
    user: &User,
    content_id: i64,
) -> Result<Content> {
    let content = storage
        .get_content_by_id(content_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("资料 {content_id} 不存在")))?;

    require_course_member(storage, user, content.course_id).await?;
    Ok(content)
}

pub async fn get_content(
    service: &ContentService,
    request: &HttpRequest,
    content_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => accessible_content(storage.as_ref(), &user, content_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(content) => Ok(HttpResponse::Ok().json(ApiResponse::success(content, "获取资料成功"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::CONTENT)),
    }
}
