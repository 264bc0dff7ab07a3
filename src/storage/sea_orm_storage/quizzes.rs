//! 测验存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::choices::{
    ActiveModel as ChoiceActiveModel, Column as ChoiceColumn, Entity as Choices,
};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{PortalError, Result};
use crate::models::quizzes::{
    entities::{Choice, Quiz, QuizDetail},
    requests::{CreateQuizRequest, UpdateQuestionRequest, UpdateQuizRequest},
};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建测验，题目与选项在同一事务中写入
    pub async fn create_quiz_impl(
        &self,
        course_id: i64,
        req: CreateQuizRequest,
    ) -> Result<QuizDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let quiz = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PortalError::database_operation(format!("创建测验失败: {e}")))?;

        for (q_pos, question) in req.questions.into_iter().enumerate() {
            let question_model = QuestionActiveModel {
                quiz_id: Set(quiz.id),
                text: Set(question.text.trim().to_string()),
                position: Set(q_pos as i32),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建题目失败: {e}")))?;

            for (c_pos, text) in question.choices.into_iter().enumerate() {
                ChoiceActiveModel {
                    question_id: Set(question_model.id),
                    text: Set(text.trim().to_string()),
                    is_correct: Set(c_pos == question.correct_choice),
                    position: Set(c_pos as i32),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| PortalError::database_operation(format!("创建选项失败: {e}")))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_quiz_detail_impl(quiz.id)
            .await?
            .ok_or_else(|| PortalError::database_operation("测验写入后未找到"))
    }

    /// 通过 ID 获取测验
    pub async fn get_quiz_by_id_impl(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    /// 获取测验及其题目、选项（均按 position 排序）
    pub async fn get_quiz_detail_impl(&self, quiz_id: i64) -> Result<Option<QuizDetail>> {
        let Some(quiz) = self.get_quiz_by_id_impl(quiz_id).await? else {
            return Ok(None);
        };

        let questions = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Position)
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目失败: {e}")))?;

        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let mut choices_by_question: HashMap<i64, Vec<Choice>> = HashMap::new();
        if !question_ids.is_empty() {
            let choices = Choices::find()
                .filter(ChoiceColumn::QuestionId.is_in(question_ids))
                .order_by_asc(ChoiceColumn::Position)
                .order_by_asc(ChoiceColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询选项失败: {e}")))?;

            for choice in choices {
                choices_by_question
                    .entry(choice.question_id)
                    .or_default()
                    .push(choice.into_choice());
            }
        }

        let questions = questions
            .into_iter()
            .map(|q| {
                let choices = choices_by_question.remove(&q.id).unwrap_or_default();
                q.into_question(choices)
            })
            .collect();

        Ok(Some(QuizDetail { quiz, questions }))
    }

    /// 列出课程测验
    pub async fn list_course_quizzes_impl(&self, course_id: i64) -> Result<Vec<Quiz>> {
        let quizzes = Quizzes::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询测验列表失败: {e}")))?;

        Ok(quizzes.into_iter().map(|m| m.into_quiz()).collect())
    }

    /// 更新测验
    ///
    /// 题目、选项必须属于该测验，否则整个更新回滚并返回校验错误。
    pub async fn update_quiz_impl(
        &self,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> Result<Option<QuizDetail>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        match Self::apply_quiz_update(&txn, quiz_id, update).await {
            Ok(true) => {
                txn.commit()
                    .await
                    .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;
            }
            Ok(false) => {
                let _ = txn.rollback().await;
                return Ok(None);
            }
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(e);
            }
        }

        self.get_quiz_detail_impl(quiz_id).await
    }

    // 返回 false 表示测验不存在
    async fn apply_quiz_update(
        txn: &DatabaseTransaction,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> Result<bool> {
        let existing = Quizzes::find_by_id(quiz_id)
            .one(txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询测验失败: {e}")))?;
        if existing.is_none() {
            return Ok(false);
        }

        let mut model = ActiveModel {
            id: Set(quiz_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(PortalError::validation("Quiz title is required"));
            }
            model.title = Set(title);
        }
        model
            .update(txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新测验失败: {e}")))?;

        for question in update.questions {
            Self::update_question_in_txn(txn, quiz_id, question).await?;
        }

        Ok(true)
    }

    async fn update_question_in_txn(
        txn: &DatabaseTransaction,
        quiz_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<()> {
        let question = Questions::find_by_id(update.id)
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .one(txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目失败: {e}")))?
            .ok_or_else(|| {
                PortalError::validation(format!(
                    "Question {} does not belong to this quiz",
                    update.id
                ))
            })?;

        if let Some(text) = update.text {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Err(PortalError::validation(format!(
                    "Question {} text cannot be empty",
                    question.id
                )));
            }
            QuestionActiveModel {
                id: Set(question.id),
                text: Set(text),
                ..Default::default()
            }
            .update(txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新题目失败: {e}")))?;
        }

        let own_choice_ids: Vec<i64> = Choices::find()
            .filter(ChoiceColumn::QuestionId.eq(question.id))
            .all(txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询选项失败: {e}")))?
            .into_iter()
            .map(|c| c.id)
            .collect();

        for choice in update.choices {
            if !own_choice_ids.contains(&choice.id) {
                return Err(PortalError::validation(format!(
                    "Choice {} does not belong to question {}",
                    choice.id, question.id
                )));
            }
            let text = choice.text.trim().to_string();
            if text.is_empty() {
                return Err(PortalError::validation(format!(
                    "Choice {} text cannot be empty",
                    choice.id
                )));
            }
            ChoiceActiveModel {
                id: Set(choice.id),
                text: Set(text),
                ..Default::default()
            }
            .update(txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新选项失败: {e}")))?;
        }

        if let Some(correct_id) = update.correct_choice_id {
            if !own_choice_ids.contains(&correct_id) {
                return Err(PortalError::validation(format!(
                    "Choice {correct_id} does not belong to question {}",
                    question.id
                )));
            }
            // 保证每题只有一个正确选项
            Choices::update_many()
                .col_expr(
                    ChoiceColumn::IsCorrect,
                    Expr::col(ChoiceColumn::Id).eq(correct_id),
                )
                .filter(ChoiceColumn::QuestionId.eq(question.id))
                .exec(txn)
                .await
                .map_err(|e| PortalError::database_operation(format!("更新正确选项失败: {e}")))?;
        }

        Ok(())
    }

    /// 删除测验（级联删除题目、选项与作答记录）
    pub async fn delete_quiz_impl(&self, quiz_id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(quiz_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::quizzes::requests::{CreateQuestionRequest, UpdateChoiceRequest};
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    /// 每题三个选项 A/B/C，correct 给出正确下标
    pub(crate) fn quiz_request(title: &str, correct: &[usize]) -> CreateQuizRequest {
        CreateQuizRequest {
            title: title.to_string(),
            questions: correct
                .iter()
                .enumerate()
                .map(|(i, &c)| CreateQuestionRequest {
                    text: format!("Question {}", i + 1),
                    choices: vec!["A".into(), "B".into(), "C".into()],
                    correct_choice: c,
                })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn test_create_quiz_preserves_order_and_correctness() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;

        let detail = storage
            .create_quiz_impl(course.id, quiz_request("Week 1", &[0, 1, 2]))
            .await
            .unwrap();

        assert_eq!(detail.questions.len(), 3);
        for (i, question) in detail.questions.iter().enumerate() {
            assert_eq!(question.position, i as i32);
            assert_eq!(question.choices.len(), 3);
            assert_eq!(question.choices.iter().filter(|c| c.is_correct).count(), 1);
            assert_eq!(question.correct_choice().unwrap().position, i as i32);
        }

        let listed = storage.list_course_quizzes_impl(course.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Week 1");
    }

    #[actix_web::test]
    async fn test_update_quiz_changes_correct_choice() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let detail = storage
            .create_quiz_impl(course.id, quiz_request("Week 1", &[0]))
            .await
            .unwrap();
        let question = &detail.questions[0];
        let new_correct = question.choices[2].id;

        let updated = storage
            .update_quiz_impl(
                detail.quiz.id,
                UpdateQuizRequest {
                    title: Some("Week 1 (revised)".into()),
                    questions: vec![UpdateQuestionRequest {
                        id: question.id,
                        text: Some("Pick C".into()),
                        choices: vec![UpdateChoiceRequest {
                            id: question.choices[0].id,
                            text: "Alpha".into(),
                        }],
                        correct_choice_id: Some(new_correct),
                    }],
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quiz.title, "Week 1 (revised)");
        let q = &updated.questions[0];
        assert_eq!(q.text, "Pick C");
        assert_eq!(q.choices[0].text, "Alpha");
        assert_eq!(q.correct_choice().map(|c| c.id), Some(new_correct));
        assert_eq!(q.choices.iter().filter(|c| c.is_correct).count(), 1);
    }

    #[actix_web::test]
    async fn test_update_quiz_rejects_foreign_choice_and_rolls_back() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let detail = storage
            .create_quiz_impl(course.id, quiz_request("Week 1", &[0, 0]))
            .await
            .unwrap();
        let first = &detail.questions[0];
        let foreign_choice = detail.questions[1].choices[1].id;

        let result = storage
            .update_quiz_impl(
                detail.quiz.id,
                UpdateQuizRequest {
                    title: Some("Should not persist".into()),
                    questions: vec![UpdateQuestionRequest {
                        id: first.id,
                        text: None,
                        choices: vec![],
                        correct_choice_id: Some(foreign_choice),
                    }],
                },
            )
            .await;
        assert!(matches!(result, Err(PortalError::Validation(_))));

        let reloaded = storage
            .get_quiz_detail_impl(detail.quiz.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.quiz.title, "Week 1");
        assert_eq!(
            reloaded.questions[0].correct_choice().map(|c| c.id),
            Some(first.choices[0].id)
        );
    }

    #[actix_web::test]
    async fn test_missing_quiz() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert!(storage.get_quiz_detail_impl(42).await.unwrap().is_none());
        assert!(
            storage
                .update_quiz_impl(42, UpdateQuizRequest { title: None, questions: vec![] })
                .await
                .unwrap()
                .is_none()
        );
        assert!(!storage.delete_quiz_impl(42).await.unwrap());
    }
}
