//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 和统一的错误响应体，
//! 不会进入处理函数。

/// 定义读取指定路径参数的 i64 提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                std::future::ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => {
                        let response = actix_web::HttpResponse::BadRequest().json(
                            $crate::models::ApiResponse::error_empty(
                                $crate::models::ErrorCode::BadRequest,
                                concat!("Invalid path parameter: ", $param),
                            ),
                        );
                        Err(actix_web::error::InternalError::from_response(
                            concat!("invalid ", $param),
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeContentIdI64, "content_id");
define_safe_i64_extractor!(SafeQuizIdI64, "quiz_id");
define_safe_i64_extractor!(SafeAttemptIdI64, "attempt_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, http::StatusCode, test};

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let req = test::TestRequest::default()
            .param("course_id", "42")
            .to_http_request();
        let id = SafeCourseIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_rejects_invalid_id() {
        for raw in ["0", "-3", "abc", "9999999999999999999999"] {
            let req = test::TestRequest::default()
                .param("quiz_id", raw)
                .to_http_request();
            let err = SafeQuizIdI64::extract(&req).await.unwrap_err();
            assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
        }

        // 参数缺失
        let req = test::TestRequest::default().to_http_request();
        assert!(SafeAttemptIdI64::extract(&req).await.is_err());
    }
}
