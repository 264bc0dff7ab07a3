use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::errors::{PortalError, Result};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::storage::Storage;

pub async fn delete_owned_quiz(storage: &dyn Storage, user: &User, quiz_id: i64) -> Result<()> {
    let quiz = storage
        .get_quiz_by_id(quiz_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("测验 {quiz_id} 不存在")))?;

    require_course_owner(storage, user, quiz.course_id).await?;
    storage.delete_quiz(quiz_id).await?;

    tracing::info!("Instructor {} deleted quiz {}", user.id, quiz_id);
    Ok(())
}

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => delete_owned_quiz(storage.as_ref(), &user, quiz_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("测验已删除"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::QUIZ)),
    }
}
