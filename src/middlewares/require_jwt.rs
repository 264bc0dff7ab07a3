/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，并把当前用户写入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_courses));
 *
 * async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::extract_user_claims(&req);
 *     // ...
 * }
 * ```
 *
 * 用户信息按 token 缓存在 `ObjectCache` 中，注销时由 logout 服务剔除。
 */

use crate::cache::{self, CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 认证缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

async fn authenticate(req: &ServiceRequest) -> Result<User, &'static str> {
    let token = JwtUtils::extract_bearer_token(req.request()).ok_or("缺少或无效的 Authorization 头")?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("Access token rejected: {}", err);
        "无效或已过期的访问令牌"
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    let key = user_cache_key(&token);
    if let Some(cache) = &cache
        && let CacheResult::Found(user) = cache::get_json::<User>(cache.as_ref(), &key).await
    {
        return Ok(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or("认证服务不可用")?
        .get_ref()
        .clone();

    let user_id = claims.user_id().ok_or("令牌中的用户 ID 无效")?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|err| {
            info!("Failed to load user {} for token: {}", user_id, err);
            "查询用户失败"
        })?
        .ok_or("用户不存在")?;

    if let Some(cache) = &cache {
        cache::insert_json(cache.as_ref(), key, &user, AppConfig::get().cache.default_ttl).await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("Authenticated user {} ({})", user.id, user.role);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(reason) => {
                    info!("Authentication failed for {}: {}", req.path(), reason);
                    Ok(req.into_response(
                        create_error_response(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, reason)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前登录用户，仅在 RequireJWT 之后的处理程序中有值
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MokaCacheWrapper;
    use crate::config::AppConfig;
    use crate::models::users::entities::NewUser;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::{App, HttpRequest, test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireJWT::extract_user_claims(&req) {
            Some(user) => HttpResponse::Ok().body(user.username),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_require_jwt_accepts_valid_access_token() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user(NewUser {
                username: "stud_01".to_string(),
                email: "stud_01@example.com".to_string(),
                password_hash: "x".to_string(),
                role: UserRole::Student,
            })
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&AppConfig::get().cache));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache.clone()))
                .service(web::scope("/p").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let pair = user.generate_token_pair(None).unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/p")
                .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "stud_01");

        // 第一次请求后用户已写入缓存
        let cached = cache::get_json::<User>(cache.as_ref(), &user_cache_key(&pair.access_token)).await;
        assert!(matches!(cached, CacheResult::Found(u) if u.id == user.id));

        // refresh token 不能当作 access token 使用
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/p")
                .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/p").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
