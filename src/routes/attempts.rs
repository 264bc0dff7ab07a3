use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::AttemptService;
use crate::utils::SafeAttemptIdI64;

static ATTEMPT_SERVICE: Lazy<AttemptService> = Lazy::new(AttemptService::new_lazy);

pub async fn list_attempts(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.list_attempts(&req).await
}

pub async fn get_attempt_result(
    req: HttpRequest,
    path: SafeAttemptIdI64,
) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.get_attempt_result(&req, path.0).await
}

// 配置路由
pub fn configure_attempts_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attempts")
            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_attempts))
            .route("/{attempt_id}", web::get().to(get_attempt_result)),
    );
}
