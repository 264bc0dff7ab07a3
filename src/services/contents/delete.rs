use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ContentService, remove_stored_file};
use crate::errors::{PortalError, Result};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::storage::Storage;

pub async fn delete_owned_content(storage: &dyn Storage, user: &User, content_id: i64) -> Result<()> {
    let content = storage
        .get_content_by_id(content_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("资料 {content_id} 不存在")))?;

    require_course_owner(storage, user, content.course_id).await?;

    storage.delete_content(content_id).await?;
    remove_stored_file(&content.file_path);

    tracing::info!("Instructor {} deleted content {}", user.id, content_id);
    Ok(())
}

pub async fn delete_content(
    service: &ContentService,
    request: &HttpRequest,
    content_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => delete_owned_content(storage.as_ref(), &user, content_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("资料已删除"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::CONTENT)),
    }
}
