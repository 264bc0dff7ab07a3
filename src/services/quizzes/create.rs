use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::errors::{PortalError, Result};
use crate::models::quizzes::{CreateQuizRequest, QuizDetail, QuizDetailResponse};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::storage::Storage;
use crate::utils::validate::validate_title;

pub async fn create_owned_quiz(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
    mut quiz: CreateQuizRequest,
) -> Result<QuizDetail> {
    require_course_owner(storage, user, course_id).await?;

    quiz.validate().map_err(PortalError::validation)?;
    validate_title(&quiz.title, "Quiz").map_err(PortalError::validation)?;

    quiz.title = quiz.title.trim().to_string();
    for question in &mut quiz.questions {
        question.text = question.text.trim().to_string();
        for choice in &mut question.choices {
            *choice = choice.trim().to_string();
        }
    }

    let detail = storage.create_quiz(course_id, quiz).await?;
    tracing::info!(
        "Instructor {} created quiz {} with {} questions",
        user.id,
        detail.quiz.id,
        detail.questions.len()
    );
    Ok(detail)
}

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    course_id: i64,
    quiz_data: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => create_owned_quiz(storage.as_ref(), &user, course_id, quiz_data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(detail) => Ok(HttpResponse::Created().json(ApiResponse::success(
            QuizDetailResponse::from_detail(detail, true),
            "测验创建成功",
        ))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::QUIZ)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    #[actix_web::test]
    async fn test_create_requires_owner_and_valid_structure() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let other = insert_user(&storage, "teach_02", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;

        assert!(matches!(
            create_owned_quiz(&storage, &other, course.id, quiz_request("Week 1", &[0])).await,
            Err(PortalError::Authorization(_))
        ));

        let mut bad = quiz_request("Week 1", &[0]);
        bad.questions[0].correct_choice = 7;
        assert!(matches!(
            create_owned_quiz(&storage, &instructor, course.id, bad).await,
            Err(PortalError::Validation(_))
        ));
        assert!(storage.list_course_quizzes(course.id).await.unwrap().is_empty());

        let detail = create_owned_quiz(&storage, &instructor, course.id, quiz_request(" Week 1 ", &[0, 2]))
            .await
            .unwrap();
        assert_eq!(detail.quiz.title, "Week 1");
        assert_eq!(detail.questions.len(), 2);
    }
}
