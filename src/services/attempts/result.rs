use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttemptService;
use crate::errors::{PortalError, Result};
use crate::models::attempts::{AttemptAnswer, AttemptResultResponse, QuestionResult};
use crate::models::quizzes::Question;
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::current_user;
use crate::storage::Storage;

fn question_result(question: &Question, answer: Option<&AttemptAnswer>) -> QuestionResult {
    let selected = answer.and_then(|a| question.choice(a.choice_id));
    let correct = question.correct_choice();

    QuestionResult {
        question_id: question.id,
        text: question.text.clone(),
        selected_choice_id: answer.map(|a| a.choice_id),
        selected_choice_text: selected.map(|c| c.text.clone()),
        correct_choice_id: correct.map(|c| c.id),
        correct_choice_text: correct.map(|c| c.text.clone()),
        // 以提交时的判分为准
        is_correct: answer.is_some_and(|a| a.is_correct),
    }
}

/// 只有作答的学生本人可以查看
pub async fn attempt_result(
    storage: &dyn Storage,
    user: &User,
    attempt_id: i64,
) -> Result<AttemptResultResponse> {
    let attempt = storage
        .get_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("作答 {attempt_id} 不存在")))?;

    if attempt.student_id != user.id {
        return Err(PortalError::authorization("无权查看该作答"));
    }

    let detail = storage
        .get_quiz_detail(attempt.quiz_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("测验 {} 不存在", attempt.quiz_id)))?;
    let answers = storage.list_attempt_answers(attempt_id).await?;

    let questions = detail
        .questions
        .iter()
        .map(|q| question_result(q, answers.iter().find(|a| a.question_id == q.id)))
        .collect();

    Ok(AttemptResultResponse {
        percentage: attempt.percentage(),
        attempt,
        quiz: detail.quiz,
        questions,
    })
}

pub async fn get_attempt_result(
    service: &AttemptService,
    request: &HttpRequest,
    attempt_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => attempt_result(storage.as_ref(), &user, attempt_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view, "获取作答结果成功"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::ATTEMPT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;
    use crate::models::quizzes::{UpdateQuestionRequest, UpdateQuizRequest};
    use crate::services::quizzes::submit_answers;
    use crate::services::quizzes::update::update_owned_quiz;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;
    use std::collections::HashMap;

    #[actix_web::test]
    async fn test_result_shows_selected_and_correct() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;
        let peer = insert_user(&storage, "stud_02", UserRole::Student).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let quiz = storage.create_quiz(course.id, quiz_request("Week 1", &[0, 1])).await.unwrap();
        storage.enroll_student(student.id, course.id).await.unwrap();

        // 第一题选对，第二题未作答
        let q1 = &quiz.questions[0];
        let answers = HashMap::from([(q1.id, q1.choices[0].id)]);
        let attempt = submit_answers(&storage, &student, quiz.quiz.id, &answers).await.unwrap();

        let view = attempt_result(&storage, &student, attempt.id).await.unwrap();
        assert_eq!(view.attempt.score, 1);
        assert_eq!(view.percentage, 50.0);
        assert!(view.questions[0].is_correct);
        assert_eq!(view.questions[0].selected_choice_text.as_deref(), Some("A"));
        assert!(!view.questions[1].is_correct);
        assert!(view.questions[1].selected_choice_id.is_none());
        assert_eq!(view.questions[1].correct_choice_text.as_deref(), Some("B"));

        for outsider in [&peer, &instructor] {
            assert!(matches!(
                attempt_result(&storage, outsider, attempt.id).await,
                Err(PortalError::Authorization(_))
            ));
        }
    }

    #[actix_web::test]
    async fn test_result_keeps_recorded_score_after_quiz_edit() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let quiz = storage.create_quiz(course.id, quiz_request("Week 1", &[0])).await.unwrap();
        storage.enroll_student(student.id, course.id).await.unwrap();

        // 选 B，此时正确答案是 A
        let question = &quiz.questions[0];
        let picked = question.choices[1].id;
        let answers = HashMap::from([(question.id, picked)]);
        let attempt = submit_answers(&storage, &student, quiz.quiz.id, &answers).await.unwrap();
        assert_eq!(attempt.score, 0);

        // 讲师把正确答案改成 B
        let update = UpdateQuizRequest {
            title: None,
            questions: vec![UpdateQuestionRequest {
                id: question.id,
                text: None,
                choices: vec![],
                correct_choice_id: Some(picked),
            }],
        };
        update_owned_quiz(&storage, &instructor, quiz.quiz.id, update).await.unwrap();

        let view = attempt_result(&storage, &student, attempt.id).await.unwrap();
        assert_eq!(view.attempt.score, 0);
        assert_eq!(view.questions[0].selected_choice_id, Some(picked));
        assert_eq!(view.questions[0].correct_choice_id, Some(picked));
        assert!(!view.questions[0].is_correct);
    }
}
