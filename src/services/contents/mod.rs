pub mod delete;
pub mod download;
pub mod get;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::storage::Storage;

pub struct ContentService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContentService {
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

    // 讲师上传课程资料（multipart）
    pub async fn upload_content(
        &self,
        request: &HttpRequest,
        course_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, course_id, payload).await
    }

    pub async fn list_contents(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_contents(self, request, course_id).await
    }

    pub async fn get_content(
        &self,
        request: &HttpRequest,
        content_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_content(self, request, content_id).await
    }

    // 下载资料文件，仅课程讲师与已选课学生
    pub async fn download_content(
        &self,
        request: &HttpRequest,
        content_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, content_id).await
    }

    pub async fn delete_content(
        &self,
        request: &HttpRequest,
        content_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_content(self, request, content_id).await
    }
}

/// 存储文件名对应的磁盘路径
pub(crate) fn stored_file_path(file_path: &str) -> PathBuf {
    PathBuf::from(&AppConfig::get().upload.dir).join(file_path)
}

/// 删除磁盘上的资料文件，文件已不存在时忽略
pub(crate) fn remove_stored_file(file_path: &str) {
    let path = stored_file_path(file_path);
    match std::fs::remove_file(&path) {
        Ok(()) => tracing::debug!("Removed stored file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::error!(
            "{}",
            PortalError::file_operation(format!("删除文件 {} 失败: {e}", path.display()))
        ),
    }
}
