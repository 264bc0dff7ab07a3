//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            instructor_id: Set(instructor_id),
            title: Set(req.title),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = normalize(query.page, query.size);

        let mut select = Courses::find();

        // 讲师筛选
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        // 标题搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        // 新课程在前，同一秒内按 ID 倒序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 最新创建的课程
    pub async fn list_recent_courses_impl(&self, limit: u64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询最新课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            // 空字符串视为清空描述
            let description = Some(description).filter(|d| !d.trim().is_empty());
            model.description = Set(description);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    pub(crate) async fn insert_course(
        storage: &SeaOrmStorage,
        instructor_id: i64,
        title: &str,
    ) -> Course {
        storage
            .create_course_impl(
                instructor_id,
                CreateCourseRequest {
                    title: title.to_string(),
                    description: Some(format!("{title} description")),
                },
            )
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_list_filters_and_searches() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let ada = insert_user(&storage, "ada_teach", UserRole::Instructor).await;
        let bob = insert_user(&storage, "bob_teach", UserRole::Instructor).await;

        insert_course(&storage, ada.id, "Rust Basics").await;
        insert_course(&storage, ada.id, "Advanced Rust").await;
        insert_course(&storage, bob.id, "Databases 101").await;

        let all = storage
            .list_courses_with_pagination_impl(CourseListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 3);
        // 最新创建的在前
        assert_eq!(all.items[0].title, "Databases 101");

        let own = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                instructor_id: Some(ada.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(own.items.len(), 2);

        let searched = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                search: Some("rust".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.pagination.total, 2);

        let paged = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                page: Some(2),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.pagination.total_pages, 2);
    }

    #[actix_web::test]
    async fn test_recent_courses_limit() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let ada = insert_user(&storage, "ada_teach", UserRole::Instructor).await;
        for i in 0..8 {
            insert_course(&storage, ada.id, &format!("Course {i}")).await;
        }

        let recent = storage.list_recent_courses_impl(6).await.unwrap();
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].title, "Course 7");
    }

    #[actix_web::test]
    async fn test_update_and_delete_course() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let ada = insert_user(&storage, "ada_teach", UserRole::Instructor).await;
        let course = insert_course(&storage, ada.id, "Draft").await;

        let updated = storage
            .update_course_impl(
                course.id,
                UpdateCourseRequest {
                    title: Some("Final".into()),
                    description: Some(String::new()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Final");
        assert!(updated.description.is_none());

        assert!(storage.delete_course_impl(course.id).await.unwrap());
        assert!(storage.get_course_by_id_impl(course.id).await.unwrap().is_none());
        assert!(
            storage
                .update_course_impl(course.id, UpdateCourseRequest { title: None, description: None })
                .await
                .unwrap()
                .is_none()
        );
    }
}
