//! 前端静态资源路由
//!
//! 前端构建产物通过 rust-embed 编译进二进制，未命中的路径回退到 index.html，
//! 由前端路由接管。HTML 中的 `%APP_TITLE%` 会替换为配置中的系统名称。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的打包产物可长期缓存
fn should_cache(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            Path::new(path).extension().and_then(|s| s.to_str()),
            Some("js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg" | "webp")
        )
}

fn render_index(content: &[u8], system_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%APP_TITLE%", system_name)
        .into_bytes()
}

fn not_built_page(system_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="utf-8">
    <title>{system_name}</title>
</head>
<body>
    <h1>{system_name}</h1>
    <p>前端资源尚未构建，API 仍可通过 /api/v1 访问。</p>
</body>
</html>"#
    )
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');
    let system_name = &AppConfig::get().app.system_name;

    // API 路径不做 SPA 回退
    if path.starts_with("api/") {
        return Ok(HttpResponse::NotFound().json(crate::models::ApiResponse::error_empty(
            crate::models::ErrorCode::NotFound,
            "接口不存在",
        )));
    }

    let (asset, file_path) = match FrontendAssets::get(path).filter(|_| !path.is_empty()) {
        Some(asset) => (Some(asset), path),
        None => (FrontendAssets::get("index.html"), "index.html"),
    };

    let Some(asset) = asset else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(not_built_page(system_name)));
    };

    let mime = get_mime_type(file_path);
    let body = if mime.starts_with("text/html") {
        render_index(&asset.data, system_name)
    } else {
        asset.data.into_owned()
    };

    let mut response = HttpResponse::Ok();
    response.content_type(mime);
    if should_cache(file_path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    } else {
        response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
    }

    Ok(response.body(body))
}

/// 放在所有 API 路由之后注册
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode};

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(get_mime_type("assets/app.js"), "application/javascript; charset=utf-8");
        assert_eq!(get_mime_type("logo.png"), "image/png");
        assert_eq!(get_mime_type("lecture.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("assets/index-3f2a.js"));
        assert!(should_cache("assets/index-3f2a.css"));
        assert!(!should_cache("index.html"));
        assert!(!should_cache("favicon.ico"));
    }

    #[test]
    fn test_render_index_replaces_title() {
        let html = b"<title>%APP_TITLE%</title>";
        let rendered = render_index(html, "E-Learning Portal");
        assert_eq!(rendered, b"<title>E-Learning Portal</title>");
    }

    #[actix_web::test]
    async fn test_unknown_api_path_is_not_spa() {
        let app = actix_test::init_service(App::new().configure(configure_frontend_routes)).await;
        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/nothing").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
