pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod scoring;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::quizzes::{CreateQuizRequest, UpdateQuizRequest};
use crate::storage::Storage;

pub use scoring::{ScoredSubmission, score_answers};
pub use submit::submit_answers;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_quizzes(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        list::list_quizzes(self, request, course_id).await
    }

    // 讲师为自己的课程创建测验
    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        course_id: i64,
        quiz_data: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, course_id, quiz_data).await
    }

    // 测验详情，仅讲师可见正确答案
    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        get::get_quiz(self, request, quiz_id).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        update_data: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_quiz(self, request, quiz_id, update_data).await
    }

    pub async fn delete_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, request, quiz_id).await
    }

    // 学生提交答案
    pub async fn submit(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        answers: HashMap<i64, i64>,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, request, quiz_id, answers).await
    }
}
