use super::entities::Course;
use crate::models::common::PaginationInfo;
use crate::models::contents::Content;
use crate::models::quizzes::Quiz;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Course>,
}

// 课程详情：课程本身、资料、测验以及当前学生是否已选课
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    pub course: Course,
    pub contents: Vec<Content>,
    pub quizzes: Vec<Quiz>,
    pub enrolled: bool,
    pub is_owner: bool,
}
