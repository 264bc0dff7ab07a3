//! 课程级访问控制
//!
//! 角色由 RequireRole 中间件校验，这里只处理与具体课程相关的归属关系。

use actix_web::HttpRequest;

use crate::errors::{PortalError, Result};
use crate::middlewares::RequireJWT;
use crate::models::courses::Course;
use crate::models::users::User;
use crate::storage::Storage;

/// 当前登录用户
pub fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| PortalError::authentication("用户未登录"))
}

pub async fn load_course(storage: &dyn Storage, course_id: i64) -> Result<Course> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("课程 {course_id} 不存在")))
}

/// 课程存在且由当前讲师创建
pub async fn require_course_owner(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
) -> Result<Course> {
    let course = load_course(storage, course_id).await?;
    if course.instructor_id != user.id {
        return Err(PortalError::authorization("只有课程讲师可以执行此操作"));
    }
    Ok(course)
}

/// 课程成员：课程讲师或已选课学生
pub async fn require_course_member(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
) -> Result<Course> {
    let course = load_course(storage, course_id).await?;
    if course.instructor_id == user.id {
        return Ok(course);
    }
    if user.is_student() && storage.get_enrollment(user.id, course_id).await?.is_some() {
        return Ok(course);
    }
    Err(PortalError::authorization("未选修该课程"))
}
