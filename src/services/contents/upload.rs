use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::{ContentService, remove_stored_file, stored_file_path};
use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::contents::{ContentType, NewContent};
use crate::models::{ApiResponse, ErrorCode, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::utils::validate::validate_title;
use crate::utils::{infer_content_type, validate_magic_bytes};

/// 文本字段的最大字节数
const MAX_TEXT_FIELD: usize = 8 * 1024;
/// 魔术字节校验所需的文件头长度
const MAGIC_HEAD_LEN: usize = 16;

/// 已落盘的上传文件
struct StoredUpload {
    stored_name: String,
    original_name: String,
    extension: String,
    size: i64,
}

#[derive(Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    content_type: Option<String>,
    file: Option<StoredUpload>,
}

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::ContentUploadFailed,
        message,
    ))
}

async fn read_text_field(field: &mut Field) -> Result<String, HttpResponse> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|_| bad_request(ErrorCode::BadRequest, "表单数据读取失败"))?;
        if buf.len() + data.len() > MAX_TEXT_FIELD {
            return Err(bad_request(ErrorCode::BadRequest, "表单字段过长"));
        }
        buf.extend_from_slice(&data);
    }
    String::from_utf8(buf).map_err(|_| bad_request(ErrorCode::BadRequest, "表单字段必须是 UTF-8 文本"))
}

/// 把文件字段写入上传目录，失败时不留下半个文件
async fn store_file_field(
    field: &mut Field,
    original_name: String,
    config: &AppConfig,
) -> Result<StoredUpload, HttpResponse> {
    let extension = Path::new(&original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    if !config
        .upload
        .allowed_types
        .iter()
        .any(|t| t.to_lowercase() == extension)
    {
        return Err(bad_request(ErrorCode::FileTypeNotAllowed, "不支持的文件类型"));
    }

    let stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
    let path = stored_file_path(&stored_name);
    let mut file = File::create(&path).map_err(|e| {
        tracing::error!("{}", PortalError::file_operation(format!("创建 {} 失败: {e}", path.display())));
        upload_failed("文件创建失败")
    })?;

    let result = async {
        let mut head: Vec<u8> = Vec::with_capacity(MAGIC_HEAD_LEN);
        let mut head_checked = false;
        let mut total_size: usize = 0;

        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|_| bad_request(ErrorCode::ContentUploadFailed, "文件传输中断"))?;

            total_size += data.len();
            if total_size > config.upload.max_size {
                return Err(bad_request(ErrorCode::FileSizeExceeded, "文件大小超出限制"));
            }

            if !head_checked {
                let take = (MAGIC_HEAD_LEN - head.len()).min(data.len());
                head.extend_from_slice(&data[..take]);
                if head.len() >= MAGIC_HEAD_LEN {
                    head_checked = true;
                    if !validate_magic_bytes(&head, &extension) {
                        return Err(bad_request(ErrorCode::FileTypeNotAllowed, "文件内容与扩展名不匹配"));
                    }
                }
            }

            file.write_all(&data).map_err(|e| {
                tracing::error!("{}", PortalError::file_operation(format!("写入失败: {e}")));
                upload_failed("文件写入失败")
            })?;
        }

        // 小于文件头长度的文件在结束时校验
        if !head_checked && !validate_magic_bytes(&head, &extension) {
            return Err(bad_request(ErrorCode::FileTypeNotAllowed, "文件内容与扩展名不匹配"));
        }

        Ok(total_size as i64)
    }
    .await;

    match result {
        Ok(size) => Ok(StoredUpload {
            stored_name,
            original_name,
            extension,
            size,
        }),
        Err(response) => {
            drop(file);
            remove_stored_file(&stored_name);
            Err(response)
        }
    }
}

async fn receive_form(payload: &mut Multipart, config: &AppConfig) -> Result<UploadForm, HttpResponse> {
    let mut form = UploadForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|_| bad_request(ErrorCode::BadRequest, "无效的 multipart 数据"))?
    {
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(|s| s.to_string()),
            ),
            None => continue,
        };

        let outcome = match name.as_str() {
            "file" if form.file.is_some() => Err(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "一次只能上传一个文件",
            )),
            "file" => store_file_field(&mut field, filename.unwrap_or_default(), config)
                .await
                .map(|stored| form.file = Some(stored)),
            "title" => read_text_field(&mut field).await.map(|v| form.title = Some(v)),
            "description" => read_text_field(&mut field).await.map(|v| form.description = Some(v)),
            "content_type" => read_text_field(&mut field).await.map(|v| form.content_type = Some(v)),
            // 忽略未知字段
            _ => read_text_field(&mut field).await.map(|_| ()),
        };

        if let Err(response) = outcome {
            if let Some(stored) = &form.file {
                remove_stored_file(&stored.stored_name);
            }
            return Err(response);
        }
    }

    Ok(form)
}

/// 校验表单的文本部分，返回标题、描述与资料类型
fn validate_form(form: &UploadForm, extension: &str) -> Result<(String, Option<String>, ContentType), HttpResponse> {
    let title = form.title.as_deref().unwrap_or_default();
    validate_title(title, "Content").map_err(|msg| bad_request(ErrorCode::BadRequest, &msg))?;

    let content_type = match form.content_type.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value
            .parse::<ContentType>()
            .map_err(|msg| bad_request(ErrorCode::BadRequest, &msg))?,
        _ => infer_content_type(extension),
    };

    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok((title.trim().to_string(), description, content_type))
}

pub async fn handle_upload(
    service: &ContentService,
    request: &HttpRequest,
    course_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    // 先确认课程归属，再接收文件
    let user = match current_user(request) {
        Ok(user) => user,
        Err(e) => return Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    };
    if let Err(e) = require_course_owner(storage.as_ref(), &user, course_id).await {
        return Ok(resource_error_response(&e, ResourceCodes::COURSE));
    }

    if let Err(e) = fs::create_dir_all(&config.upload.dir) {
        tracing::error!("{}", PortalError::file_operation(format!("创建上传目录失败: {e}")));
        return Ok(upload_failed("创建上传目录失败"));
    }

    let form = match receive_form(&mut payload, config).await {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };

    let Some(file) = &form.file else {
        return Ok(bad_request(ErrorCode::FileNotFound, "缺少上传文件"));
    };

    let (title, description, content_type) = match validate_form(&form, &file.extension) {
        Ok(parts) => parts,
        Err(response) => {
            remove_stored_file(&file.stored_name);
            return Ok(response);
        }
    };

    let new_content = NewContent {
        course_id,
        title,
        description,
        content_type,
        file_path: file.stored_name.clone(),
        original_name: file.original_name.clone(),
        file_size: file.size,
    };

    match storage.create_content(new_content).await {
        Ok(content) => {
            tracing::info!(
                "Instructor {} uploaded content {} ({} bytes) to course {}",
                user.id,
                content.id,
                content.file_size,
                course_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(content, "资料上传成功")))
        }
        Err(e) => {
            remove_stored_file(&file.stored_name);
            tracing::error!("Failed to save content record: {}", e);
            Ok(upload_failed("资料保存失败"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MokaCacheWrapper, ObjectCache};
    use crate::models::users::{User, UserRole};
    use crate::routes::{configure_contents_routes, configure_courses_routes};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::users::tests::insert_user;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use std::collections::HashSet;
    use std::sync::Arc;

    const BOUNDARY: &str = "portal-upload-boundary";

    fn multipart_body(title: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(user: &User, course_id: i64, body: Vec<u8>) -> actix_test::TestRequest {
        let token = user.generate_token_pair(None).unwrap().access_token;
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/contents"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    fn stored_names() -> HashSet<String> {
        std::fs::read_dir(&AppConfig::get().upload.dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_upload_stores_file_and_rejects_bad_content() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let owner = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let other = insert_user(&storage, "teach_02", UserRole::Instructor).await;
        let course = insert_course(&storage, owner.id, "Rust").await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&AppConfig::get().cache));

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache))
                .configure(configure_courses_routes)
                .configure(configure_contents_routes),
        )
        .await;

        // 合法 PDF 落盘并由资料记录引用
        let pdf = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF";
        let resp = actix_test::call_service(
            &app,
            upload_request(&owner, course.id, multipart_body("Week 1 notes", "a.pdf", pdf)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let content_id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["content_type"], "pdf");
        assert_eq!(body["data"]["original_name"], "a.pdf");
        let stored = storage.get_content_by_id(content_id).await.unwrap().unwrap();
        let file_path = stored.file_path;
        assert_eq!(std::fs::read(stored_file_path(&file_path)).unwrap(), pdf);

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/contents/{content_id}/download"))
                .insert_header((
                    "Authorization",
                    format!("Bearer {}", owner.generate_token_pair(None).unwrap().access_token),
                ))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(resp).await.as_ref(), pdf);

        // 扩展名与内容不符时拒绝且不留文件
        let before = stored_names();
        let resp = actix_test::call_service(
            &app,
            upload_request(&owner, course.id, multipart_body("Fake", "b.pdf", b"MZ\x90\x00not a pdf")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::FileTypeNotAllowed as i32);
        assert_eq!(stored_names(), before);

        // 非课程讲师在接收文件前即被拒绝
        let resp = actix_test::call_service(
            &app,
            upload_request(&other, course.id, multipart_body("Mine", "c.pdf", pdf)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(stored_names(), before);

        assert_eq!(storage.list_course_contents(course.id).await.unwrap().len(), 1);
        remove_stored_file(&file_path);
    }

    fn form(title: Option<&str>, content_type: Option<&str>) -> UploadForm {
        UploadForm {
            title: title.map(str::to_string),
            description: Some("  ".to_string()),
            content_type: content_type.map(str::to_string),
            file: None,
        }
    }

    #[test]
    fn test_validate_form_defaults() {
        let (title, description, kind) = validate_form(&form(Some(" Lecture 1 "), None), ".mp4").unwrap();
        assert_eq!(title, "Lecture 1");
        assert!(description.is_none());
        assert_eq!(kind, ContentType::Video);

        let (_, _, kind) = validate_form(&form(Some("Notes"), None), ".zip").unwrap();
        assert_eq!(kind, ContentType::Other);

        let (_, _, kind) = validate_form(&form(Some("Notes"), Some("pdf")), ".zip").unwrap();
        assert_eq!(kind, ContentType::Pdf);
    }

    #[test]
    fn test_validate_form_rejects() {
        assert!(validate_form(&form(None, None), ".pdf").is_err());
        assert!(validate_form(&form(Some("   "), None), ".pdf").is_err());
        assert!(validate_form(&form(Some("Notes"), Some("audio")), ".pdf").is_err());
    }
}
