use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::quizzes::QuizListResponse;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_member};

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = current_user(request)?;
        require_course_member(storage.as_ref(), &user, course_id).await?;
        storage.list_course_quizzes(course_id).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizListResponse { items },
            "获取测验列表成功",
        ))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    }
}
