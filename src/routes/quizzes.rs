use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::quizzes::{SubmitAnswersRequest, UpdateQuizRequest};
use crate::models::users::entities::UserRole;
use crate::services::QuizService;
use crate::utils::SafeQuizIdI64;

static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn get_quiz(req: HttpRequest, path: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, path.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    path: SafeQuizIdI64,
    body: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.update_quiz(&req, path.0, body.into_inner()).await
}

pub async fn delete_quiz(req: HttpRequest, path: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, path.0).await
}

// 提交作答
pub async fn submit_quiz(
    req: HttpRequest,
    path: SafeQuizIdI64,
    body: web::Json<SubmitAnswersRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit(&req, path.0, body.into_inner().answers)
        .await
}

// 配置路由
pub fn configure_quizzes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{quiz_id}")
                    // 课程成员可查看，答案仅对讲师可见
                    .route(web::get().to(get_quiz))
                    .route(
                        web::put()
                            .to(update_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{quiz_id}/attempts").route(
                    web::post()
                        .to(submit_quiz)
                        .wrap(RateLimit::quiz_submit())
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            ),
    );
}
