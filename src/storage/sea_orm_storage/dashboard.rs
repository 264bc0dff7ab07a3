//! 仪表盘统计

use super::SeaOrmStorage;
use crate::entity::contents::{Column as ContentColumn, Entity as Contents};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::quizzes::{Column as QuizColumn, Entity as Quizzes};
use crate::errors::{PortalError, Result};
use crate::models::dashboard::{CourseSummary, InstructorDashboard};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 讲师仪表盘：自己的课程（含资料、测验、选课人数）与全部测验
    pub async fn get_instructor_dashboard_impl(
        &self,
        instructor_id: i64,
    ) -> Result<InstructorDashboard> {
        let courses = Courses::find()
            .filter(CourseColumn::InstructorId.eq(instructor_id))
            .order_by_desc(CourseColumn::CreatedAt)
            .order_by_desc(CourseColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询讲师课程失败: {e}")))?;

        let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();

        let quizzes = if course_ids.is_empty() {
            Vec::new()
        } else {
            Quizzes::find()
                .filter(QuizColumn::CourseId.is_in(course_ids))
                .order_by_desc(QuizColumn::CreatedAt)
                .order_by_desc(QuizColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询讲师测验失败: {e}")))?
        };

        let mut summaries = Vec::with_capacity(courses.len());
        for course in courses {
            let content_count = Contents::find()
                .filter(ContentColumn::CourseId.eq(course.id))
                .count(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询资料数量失败: {e}")))?
                as i64;

            let enrollment_count = Enrollments::find()
                .filter(EnrollmentColumn::CourseId.eq(course.id))
                .count(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询选课人数失败: {e}")))?
                as i64;

            let quiz_count = quizzes.iter().filter(|q| q.course_id == course.id).count() as i64;

            summaries.push(CourseSummary {
                course: course.into_course(),
                content_count,
                quiz_count,
                enrollment_count,
            });
        }

        Ok(InstructorDashboard {
            total_courses: summaries.len() as i64,
            total_contents: summaries.iter().map(|s| s.content_count).sum(),
            total_quizzes: quizzes.len() as i64,
            courses: summaries,
            quizzes: quizzes.into_iter().map(|q| q.into_quiz()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::contents::tests::new_content;
    use crate::storage::sea_orm_storage::courses::tests::insert_course;
    use crate::storage::sea_orm_storage::quizzes::tests::quiz_request;
    use crate::storage::sea_orm_storage::users::tests::insert_user;

    #[actix_web::test]
    async fn test_instructor_dashboard_counts() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let instructor = insert_user(&storage, "teach_01", UserRole::Instructor).await;
        let other = insert_user(&storage, "teach_02", UserRole::Instructor).await;
        let student = insert_user(&storage, "stud_01", UserRole::Student).await;

        let course = insert_course(&storage, instructor.id, "Rust").await;
        storage
            .create_content_impl(new_content(course.id, "lecture"))
            .await
            .unwrap();
        storage
            .create_quiz_impl(course.id, quiz_request("Week 1", &[0, 1]))
            .await
            .unwrap();
        storage.enroll_student_impl(student.id, course.id).await.unwrap();

        // 其他讲师的数据不计入
        let foreign = insert_course(&storage, other.id, "Other").await;
        storage
            .create_quiz_impl(foreign.id, quiz_request("Foreign", &[0]))
            .await
            .unwrap();

        let dashboard = storage.get_instructor_dashboard_impl(instructor.id).await.unwrap();
        assert_eq!(dashboard.total_courses, 1);
        assert_eq!(dashboard.total_contents, 1);
        assert_eq!(dashboard.total_quizzes, 1);
        assert_eq!(dashboard.courses[0].quiz_count, 1);
        assert_eq!(dashboard.courses[0].enrollment_count, 1);
        assert_eq!(dashboard.quizzes[0].title, "Week 1");

        let empty = storage.get_instructor_dashboard_impl(student.id).await.unwrap();
        assert_eq!(empty.total_courses, 0);
        assert!(empty.quizzes.is_empty());
    }
}
