use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::contents::ContentListResponse;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_member};

pub async fn list_contents(
    service: &ContentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = current_user(request)?;
        require_course_member(storage.as_ref(), &user, course_id).await?;
        storage.list_course_contents(course_id).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ContentListResponse { items },
            "获取资料列表成功",
        ))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    }
}
