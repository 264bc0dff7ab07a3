use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::QuizService;
use super::scoring::score_answers;
use crate::errors::{PortalError, Result};
use crate::models::attempts::{Attempt, NewAttempt, SubmitAttemptResponse};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::current_user;
use crate::storage::Storage;

/// 评分并记录一次作答，每次提交都会生成新的作答记录
pub async fn submit_answers(
    storage: &dyn Storage,
    user: &User,
    quiz_id: i64,
    answers: &HashMap<i64, i64>,
) -> Result<Attempt> {
    let detail = storage
        .get_quiz_detail(quiz_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("测验 {quiz_id} 不存在")))?;

    if !user.is_student() {
        return Err(PortalError::authorization("只有学生可以参加测验"));
    }
    if storage
        .get_enrollment(user.id, detail.quiz.course_id)
        .await?
        .is_none()
    {
        return Err(PortalError::authorization("未选修该课程"));
    }

    let scored = score_answers(&detail, answers);
    let attempt = storage
        .create_attempt(NewAttempt {
            quiz_id,
            student_id: user.id,
            score: scored.score,
            total_questions: scored.total_questions,
            answers: scored.answers,
        })
        .await?;

    tracing::info!(
        "Student {} scored {}/{} on quiz {}",
        user.id,
        attempt.score,
        attempt.total_questions,
        quiz_id
    );
    Ok(attempt)
}

pub async fn handle_submit(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    answers: HashMap<i64, i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => submit_answers(storage.as_ref(), &user, quiz_id, &answers).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(attempt) => Ok(HttpResponse::Created().json(ApiResponse::success(
            SubmitAttemptResponse {
                percentage: attempt.percentage(),
                attempt,
            },
            "提交成功",
        ))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::QUIZ)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::QuizDetail;
    use crate::models::users::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    struct Fixture {
        storage: SeaOrmStorage,
        instructor: User,
        student: User,
        quiz: QuizDetail,
    }

    /// 三道题，正确答案依次为 A、B、C，学生已选课
    async fn fixture() -> Fixture {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let quiz = storage.create_quiz(course.id, quiz_request("Week 1", &[0, 1, 2])).await.unwrap();
        storage.enroll_student(student.id, course.id).await.unwrap();
        Fixture {
            storage,
            instructor,
            student,
            quiz,
        }
    }

    /// 每题选第 picks[i] 个选项
    fn pick(quiz: &QuizDetail, picks: &[usize]) -> HashMap<i64, i64> {
        quiz.questions
            .iter()
            .zip(picks)
            .map(|(q, &p)| (q.id, q.choices[p].id))
            .collect()
    }

    #[actix_web::test]
    async fn test_scores_and_records_attempts() {
        let f = fixture().await;

        let perfect = submit_answers(&f.storage, &f.student, f.quiz.quiz.id, &pick(&f.quiz, &[0, 1, 2]))
            .await
            .unwrap();
        assert_eq!((perfect.score, perfect.total_questions), (3, 3));

        let partial = submit_answers(&f.storage, &f.student, f.quiz.quiz.id, &pick(&f.quiz, &[0, 1, 0]))
            .await
            .unwrap();
        assert_eq!(partial.score, 2);

        let blank = submit_answers(&f.storage, &f.student, f.quiz.quiz.id, &HashMap::new())
            .await
            .unwrap();
        assert_eq!(blank.score, 0);

        // 之前的作答不受影响
        let first = f.storage.get_attempt_by_id(perfect.id).await.unwrap().unwrap();
        assert_eq!(first, perfect);
        assert_eq!(f.storage.list_student_attempts(f.student.id).await.unwrap().len(), 3);

        let recorded = f.storage.list_attempt_answers(partial.id).await.unwrap();
        assert_eq!(recorded.iter().filter(|a| a.is_correct).count(), 2);
    }

    #[actix_web::test]
    async fn test_foreign_question_is_ignored() {
        let f = fixture().await;
        let mut answers = pick(&f.quiz, &[0, 1, 2]);
        answers.insert(987_654, 1);

        let attempt = submit_answers(&f.storage, &f.student, f.quiz.quiz.id, &answers).await.unwrap();
        assert_eq!(attempt.score, 3);
        assert_eq!(f.storage.list_attempt_answers(attempt.id).await.unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_rejects_without_creating_attempt() {
        let f = fixture().await;
        let outsider = insert_user(&f.storage, "stud_02", UserRole::Student).await;
        let answers = pick(&f.quiz, &[0, 1, 2]);

        assert!(matches!(
            submit_answers(&f.storage, &outsider, f.quiz.quiz.id, &answers).await,
            Err(PortalError::Authorization(_))
        ));
        assert!(f.storage.list_student_attempts(outsider.id).await.unwrap().is_empty());

        assert!(matches!(
            submit_answers(&f.storage, &f.instructor, f.quiz.quiz.id, &answers).await,
            Err(PortalError::Authorization(_))
        ));
        assert!(f.storage.list_student_attempts(f.instructor.id).await.unwrap().is_empty());

        assert!(matches!(
            submit_answers(&f.storage, &f.student, 424_242, &answers).await,
            Err(PortalError::NotFound(_))
        ));
    }
}
