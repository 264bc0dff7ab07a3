use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::dashboard::{DashboardResponse, StudentDashboard};
use crate::models::users::{User, UserRole};
use crate::models::{ApiResponse, error_response};
use crate::services::access::current_user;
use crate::storage::Storage;

pub async fn build_dashboard(storage: &dyn Storage, user: &User) -> Result<DashboardResponse> {
    match user.role {
        UserRole::Instructor => Ok(DashboardResponse {
            role: UserRole::Instructor,
            instructor: Some(storage.get_instructor_dashboard(user.id).await?),
            student: None,
        }),
        UserRole::Student => Ok(DashboardResponse {
            role: UserRole::Student,
            instructor: None,
            student: Some(StudentDashboard {
                enrollments: storage.list_student_enrollments(user.id).await?,
                attempts: storage.list_student_attempts(user.id).await?,
            }),
        }),
    }
}

pub async fn get_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_user(request) {
        Ok(user) => build_dashboard(storage.as_ref(), &user).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "获取仪表盘成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::quizzes::submit_answers;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::contents::tests::new_content;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;
    use std::collections::HashMap;

    #[actix_web::test]
    async fn test_dashboards_by_role() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;

        let course = insert_course(&storage, instructor.id, "Rust").await;
        storage.create_content(new_content(course.id, "intro")).await.unwrap();
        let quiz = storage.create_quiz(course.id, quiz_request("Week 1", &[0, 1])).await.unwrap();

        let dashboard = build_dashboard(&storage, &instructor).await.unwrap();
        assert!(dashboard.student.is_none());
        let instructor = dashboard.instructor.unwrap();
        assert_eq!(instructor.total_courses, 1);
        assert_eq!(instructor.total_contents, 1);
        assert_eq!(instructor.total_quizzes, 1);

        storage.enroll_student(student.id, course.id).await.unwrap();
        submit_answers(&storage, &student, quiz.quiz.id, &HashMap::new()).await.unwrap();

        let dashboard = build_dashboard(&storage, &student).await.unwrap();
        assert!(dashboard.instructor.is_none());
        let view = dashboard.student.unwrap();
        assert_eq!(view.enrollments.len(), 1);
        assert_eq!(view.enrollments[0].course.title, "Rust");
        assert_eq!(view.attempts.len(), 1);
        assert_eq!(view.attempts[0].quiz_title, "Week 1");
        assert_eq!(view.attempts[0].attempt.total_questions, 2);
    }
}
