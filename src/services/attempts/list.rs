use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttemptService;
use crate::models::attempts::AttemptListResponse;
use crate::models::{ApiResponse, error_response};
use crate::services::access::current_user;

pub async fn list_attempts(
    service: &AttemptService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => storage.list_student_attempts(user.id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttemptListResponse { items },
            "获取作答记录成功",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
