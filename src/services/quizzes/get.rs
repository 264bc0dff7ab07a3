use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::errors::{PortalError, Result};
use crate::models::quizzes::QuizDetailResponse;
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_member};
use crate::storage::Storage;

/// 课程讲师看到正确答案，已选课学生看到不含答案的题目
pub async fn quiz_view(storage: &dyn Storage, user: &User, quiz_id: i64) -> Result<QuizDetailResponse> {
    let detail = storage
        .get_quiz_detail(quiz_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("测验 {quiz_id} 不存在")))?;

    let course = require_course_member(storage, user, detail.quiz.course_id).await?;
    let is_owner = course.instructor_id == user.id;

    Ok(QuizDetailResponse::from_detail(detail, is_owner))
}

pub async fn get_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => quiz_view(storage.as_ref(), &user, quiz_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view, "获取测验成功"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::QUIZ)),
    }
}
