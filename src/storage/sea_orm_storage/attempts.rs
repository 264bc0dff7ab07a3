//! 作答存储操作

use super::SeaOrmStorage;
use crate::entity::attempt_answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as AttemptAnswers,
};
use crate::entity::attempts::{ActiveModel, Column, Entity as Attempts};
use crate::entity::quizzes::Entity as Quizzes;
use crate::errors::{PortalError, Result};
use crate::models::attempts::entities::{Attempt, AttemptAnswer, AttemptSummary, NewAttempt};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 记录一次作答，作答行与明细在同一事务中写入
    pub async fn create_attempt_impl(&self, attempt: NewAttempt) -> Result<Attempt> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            quiz_id: Set(attempt.quiz_id),
            student_id: Set(attempt.student_id),
            score: Set(attempt.score),
            total_questions: Set(attempt.total_questions),
            submitted_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PortalError::database_operation(format!("保存作答失败: {e}")))?;

        if !attempt.answers.is_empty() {
            let answers = attempt.answers.into_iter().map(|a| AnswerActiveModel {
                attempt_id: Set(model.id),
                question_id: Set(a.question_id),
                choice_id: Set(a.choice_id),
                is_correct: Set(a.is_correct),
                ..Default::default()
            });

            AttemptAnswers::insert_many(answers)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| PortalError::database_operation(format!("保存作答明细失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(model.into_attempt())
    }

    /// 通过 ID 获取作答
    pub async fn get_attempt_by_id_impl(&self, attempt_id: i64) -> Result<Option<Attempt>> {
        let result = Attempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    /// 作答明细
    pub async fn list_attempt_answers_impl(&self, attempt_id: i64) -> Result<Vec<AttemptAnswer>> {
        let answers = AttemptAnswers::find()
            .filter(AnswerColumn::AttemptId.eq(attempt_id))
            .order_by_asc(AnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作答明细失败: {e}")))?;

        Ok(answers.into_iter().map(|m| m.into_attempt_answer()).collect())
    }

    /// 学生的全部作答，最新在前
    pub async fn list_student_attempts_impl(&self, student_id: i64) -> Result<Vec<AttemptSummary>> {
        let rows = Attempts::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Quizzes)
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(attempt, quiz)| {
                quiz.map(|q| {
                    let attempt = attempt.into_attempt();
                    AttemptSummary {
                        percentage: attempt.percentage(),
                        attempt,
                        quiz_title: q.title,
                        course_id: q.course_id,
                    }
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempts::entities::NewAttemptAnswer;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    #[actix_web::test]
    async fn test_attempts_are_never_overwritten() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let quiz = storage
            .create_quiz_impl(course.id, quiz_request("Week 1", &[0]))
            .await
            .unwrap();
        let question = &quiz.questions[0];

        let first = storage
            .create_attempt_impl(NewAttempt {
                quiz_id: quiz.quiz.id,
                student_id: student.id,
                score: 1,
                total_questions: 1,
                answers: vec![NewAttemptAnswer {
                    question_id: question.id,
                    choice_id: question.choices[0].id,
                    is_correct: true,
                }],
            })
            .await
            .unwrap();

        let second = storage
            .create_attempt_impl(NewAttempt {
                quiz_id: quiz.quiz.id,
                student_id: student.id,
                score: 0,
                total_questions: 1,
                answers: vec![],
            })
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        let reloaded = storage.get_attempt_by_id_impl(first.id).await.unwrap().unwrap();
        assert_eq!(reloaded, first);

        let answers = storage.list_attempt_answers_impl(first.id).await.unwrap();
        assert_eq!(answers.len(), 1);
        assert!(answers[0].is_correct);
        assert!(storage.list_attempt_answers_impl(second.id).await.unwrap().is_empty());

        let summaries = storage.list_student_attempts_impl(student.id).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].attempt.id, second.id);
        assert_eq!(summaries[1].quiz_title, "Week 1");
        assert_eq!(summaries[1].percentage, 100.0);
    }

    #[actix_web::test]
    async fn test_quiz_delete_cascades_attempts() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let quiz = storage
            .create_quiz_impl(course.id, quiz_request("Week 1", &[1]))
            .await
            .unwrap();
        let attempt = storage
            .create_attempt_impl(NewAttempt {
                quiz_id: quiz.quiz.id,
                student_id: student.id,
                score: 0,
                total_questions: 1,
                answers: vec![],
            })
            .await
            .unwrap();

        storage.delete_quiz_impl(quiz.quiz.id).await.unwrap();
        assert!(storage.get_attempt_by_id_impl(attempt.id).await.unwrap().is_none());
    }
}
