use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::errors::{PortalError, Result};
use crate::models::users::User;
use crate::models::{ApiResponse, ErrorCode, ResourceCodes, resource_error_response};
use crate::services::access::{current_user, load_course};
use crate::storage::Storage;

/// 退课，历史作答保留
pub async fn leave_course(storage: &dyn Storage, user: &User, course_id: i64) -> Result<()> {
    if !user.is_student() {
        return Err(PortalError::authorization("只有学生可以退课"));
    }
    load_course(storage, course_id).await?;

    if !storage.unenroll_student(user.id, course_id).await? {
        return Err(PortalError::not_found("未选修该课程"));
    }

    tracing::info!("Student {} left course {}", user.id, course_id);
    Ok(())
}

pub async fn handle_unenroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => leave_course(storage.as_ref(), &user, course_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("已退课"))),
        Err(e) => Ok(resource_error_response(
            &e,
            ResourceCodes {
                not_found: ErrorCode::NotEnrolled,
                ..ResourceCodes::ENROLLMENT
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;
    use crate::services::enrollments::enroll_in_course;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    #[actix_web::test]
    async fn test_leave_then_rejoin() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;
        let course = insert_course(&storage, instructor.id, "Rust").await;

        assert!(matches!(
            leave_course(&storage, &student, course.id).await,
            Err(PortalError::NotFound(_))
        ));

        enroll_in_course(&storage, &student, course.id).await.unwrap();
        leave_course(&storage, &student, course.id).await.unwrap();
        assert!(storage.get_enrollment(student.id, course.id).await.unwrap().is_none());

        let (_, created) = enroll_in_course(&storage, &student, course.id).await.unwrap();
        assert!(created);
    }
}
