use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ContentService;
use crate::utils::SafeContentIdI64;

static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);

pub async fn get_content(req: HttpRequest, path: SafeContentIdI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.get_content(&req, path.0).await
}

pub async fn download_content(
    req: HttpRequest,
    path: SafeContentIdI64,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.download_content(&req, path.0).await
}

pub async fn delete_content(req: HttpRequest, path: SafeContentIdI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.delete_content(&req, path.0).await
}

// 配置路由
pub fn configure_contents_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/contents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{content_id}")
                    .route(web::get().to(get_content))
                    .route(
                        web::delete()
                            .to(delete_content)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{content_id}/download").route(web::get().to(download_content)),
            ),
    );
}
