//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::contents::{ActiveModel, Column, Entity as Contents};
use crate::errors::{PortalError, Result};
use crate::models::contents::entities::{Content, NewContent};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录已上传的资料
    pub async fn create_content_impl(&self, content: NewContent) -> Result<Content> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(content.course_id),
            title: Set(content.title),
            description: Set(content.description),
            content_type: Set(content.content_type.to_string()),
            file_path: Set(content.file_path),
            original_name: Set(content.original_name),
            file_size: Set(content.file_size),
            uploaded_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("保存课程资料失败: {e}")))?;

        Ok(result.into_content())
    }

    /// 通过 ID 获取资料
    pub async fn get_content_by_id_impl(&self, content_id: i64) -> Result<Option<Content>> {
        let result = Contents::find_by_id(content_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程资料失败: {e}")))?;

        Ok(result.map(|m| m.into_content()))
    }

    /// 列出课程资料，最新上传的在前
    pub async fn list_course_contents_impl(&self, course_id: i64) -> Result<Vec<Content>> {
        let contents = Contents::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程资料列表失败: {e}")))?;

        Ok(contents.into_iter().map(|m| m.into_content()).collect())
    }

    /// 删除资料记录（文件由服务层删除）
    pub async fn delete_content_impl(&self, content_id: i64) -> Result<bool> {
        let result = Contents::delete_by_id(content_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::contents::entities::ContentType;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    pub(crate) fn new_content(course_id: i64, title: &str) -> NewContent {
        NewContent {
            course_id,
            title: title.to_string(),
            description: None,
            content_type: ContentType::Pdf,
            file_path: format!("1700000000-{title}.bin"),
            original_name: format!("{title}.pdf"),
            file_size: 1024,
        }
    }

    #[actix_web::test]
    async fn test_content_lifecycle() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;
        let other = insert_course(&storage, instructor.id, "Other").await;

        let slides = storage
            .create_content_impl(new_content(course.id, "slides"))
            .await
            .unwrap();
        assert_eq!(slides.content_type, ContentType::Pdf);
        assert_eq!(slides.file_path, "1700000000-slides.bin");
        storage
            .create_content_impl(new_content(other.id, "elsewhere"))
            .await
            .unwrap();

        let listed = storage.list_course_contents_impl(course.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, slides.id);

        assert!(storage.delete_content_impl(slides.id).await.unwrap());
        assert!(storage.get_content_by_id_impl(slides.id).await.unwrap().is_none());
    }
}
