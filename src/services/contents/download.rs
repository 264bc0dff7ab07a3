use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::{ContentService, stored_file_path};
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode, ResourceCodes, resource_error_response};
use crate::services::access::current_user;
use crate::services::contents::get::accessible_content;

pub async fn handle_download(
    service: &ContentService,
    request: &HttpRequest,
    content_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => accessible_content(storage.as_ref(), &user, content_id).await,
        Err(e) => Err(e),
    };
    let content = match result {
        Ok(content) => content,
        Err(e) => return Ok(resource_error_response(&e, ResourceCodes::CONTENT)),
    };

    let path = stored_file_path(&content.file_path);
    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Stored file missing for content {}: {}", content.id, path.display());
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "文件不存在",
            )));
        }
        Err(e) => {
            tracing::error!("{}", PortalError::file_operation(format!("读取 {} 失败: {e}", path.display())));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "文件读取失败",
                )),
            );
        }
    };

    // 使用上传时的原始文件名
    let file_name = content.original_name.replace(['"', '\\', '\r', '\n'], "_");
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(data))
}
