use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::{PortalError, Result};
use crate::models::courses::{Course, UpdateCourseRequest};
use crate::models::users::User;
use crate::models::{ApiResponse, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, require_course_owner};
use crate::storage::Storage;
use crate::utils::validate::validate_title;

pub async fn update_owned_course(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
    mut update: UpdateCourseRequest,
) -> Result<Course> {
    require_course_owner(storage, user, course_id).await?;

    if let Some(title) = update.title.as_deref() {
        validate_title(title, "Course").map_err(PortalError::validation)?;
        update.title = Some(title.trim().to_string());
    }

    storage
        .update_course(course_id, update)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("课程 {course_id} 不存在")))
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => update_owned_course(storage.as_ref(), &user, course_id, update_data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程更新成功"))),
        Err(e) => Ok(resource_error_response(&e, ResourceCodes::COURSE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    #[actix_web::test]
    async fn test_only_owner_updates() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let other = insert_user(&storage, "teach_02", UserRole::Instructor).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;

        let rename = || UpdateCourseRequest {
            title: Some("  Rust 2024  ".to_string()),
            description: None,
        };

        assert!(matches!(
            update_owned_course(&storage, &other, course.id, rename()).await,
            Err(PortalError::Authorization(_))
        ));

        let updated = update_owned_course(&storage, &instructor, course.id, rename()).await.unwrap();
        assert_eq!(updated.title, "Rust 2024");
        assert_eq!(updated.description, course.description);

        let blank = UpdateCourseRequest {
            title: Some("   ".to_string()),
            description: None,
        };
        assert!(matches!(
            update_owned_course(&storage, &instructor, course.id, blank).await,
            Err(PortalError::Validation(_))
        ));
    }
}
