//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{PortalError, Result};
use crate::models::enrollments::entities::{Enrollment, EnrollmentWithCourse};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 选课
    ///
    /// 依赖 (student_id, course_id) 唯一索引，重复选课不会产生第二条记录，
    /// 并发请求也只会有一个插入成功。
    pub async fn enroll_student_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<(Enrollment, bool)> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrolled_at: Set(now),
            ..Default::default()
        };

        let inserted = Enrollments::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::CourseId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("选课失败: {e}")))?;

        let enrollment = self
            .get_enrollment_impl(student_id, course_id)
            .await?
            .ok_or_else(|| PortalError::database_operation("选课记录写入后未找到"))?;

        Ok((enrollment, inserted > 0))
    }

    /// 退课
    pub async fn unenroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(Self::enrollment_condition(student_id, course_id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Self::enrollment_condition(student_id, course_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 学生的全部选课，最近选的在前
    pub async fn list_student_enrollments_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EnrollmentWithCourse>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Courses)
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|c| EnrollmentWithCourse {
                    enrollment: enrollment.into_enrollment(),
                    course: c.into_course(),
                })
            })
            .collect())
    }

    fn enrollment_condition(student_id: i64, course_id: i64) -> Condition {
        Condition::all()
            .add(Column::StudentId.eq(student_id))
            .add(Column::CourseId.eq(course_id))
    }
}
