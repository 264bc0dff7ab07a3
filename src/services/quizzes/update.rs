use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::errors::{PortalError, Result};
use crate::models::quizzes::{QuizDetail, QuizDetailResponse, UpdateQuizRequest};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::storage::Storage;
use crate::utils::validate::validate_title;

/// 修改标题、题干、选项文本与正确选项，整个修改在一个事务内完成
pub async fn update_owned_quiz(
    storage: &dyn Storage,
    user: &User,
    quiz_id: i64,
    update: UpdateQuizRequest,
) -> Result<QuizDetail> {
    let quiz = storage
        .get_quiz_by_id(quiz_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("测验 {quiz_id} 不存在")))?;

    require_course_owner(storage, user, quiz.course_id).await?;

    if let Some(title) = update.title.as_deref() {
        validate_title(title, "Quiz").map_err(PortalError::validation)?;
    }

    storage
        .update_quiz(quiz_id, update)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("测验 {quiz_id} 不存在")))
}

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    update_data: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => update_owned_quiz(storage.as_ref(), &user, quiz_id, update_data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizDetailResponse::from_detail(detail, true),
            "测验更新成功",
        ))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::QUIZ)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::UpdateQuestionRequest;
    use crate::models::users::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    #[actix_web::test]
    async fn test_owner_changes_correct_choice() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let other = insert_user(&storage, "teach_02", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let quiz = storage.create_quiz(course.id, quiz_request("Week 1", &[0])).await.unwrap();
        let question = &quiz.questions[0];

        let switch = || UpdateQuizRequest {
            title: None,
            questions: vec![UpdateQuestionRequest {
                id: question.id,
                text: None,
                choices: vec![],
                correct_choice_id: Some(question.choices[2].id),
            }],
        };

        assert!(matches!(
            update_owned_quiz(&storage, &other, quiz.quiz.id, switch()).await,
            Err(PortalError::Authorization(_))
        ));

        let updated = update_owned_quiz(&storage, &instructor, quiz.quiz.id, switch()).await.unwrap();
        let correct = updated.questions[0].correct_choice().unwrap();
        assert_eq!(correct.id, question.choices[2].id);
        assert_eq!(updated.questions[0].choices.iter().filter(|c| c.is_correct).count(), 1);

        assert!(matches!(
            update_owned_quiz(&storage, &instructor, 31_337, switch()).await,
            Err(PortalError::NotFound(_))
        ));
    }
}
