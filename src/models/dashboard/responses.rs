use crate::models::attempts::AttemptSummary;
use crate::models::courses::Course;
use crate::models::enrollments::EnrollmentWithCourse;
use crate::models::quizzes::Quiz;
use crate::models::users::UserRole;
use serde::Serialize;
use ts_rs::TS;

// 讲师视角的课程统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct CourseSummary {
    pub course: Course,
    pub content_count: i64,
    pub quiz_count: i64,
    pub enrollment_count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct InstructorDashboard {
    pub courses: Vec<CourseSummary>,
    pub quizzes: Vec<Quiz>,
    pub total_courses: i64,
    pub total_contents: i64,
    pub total_quizzes: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub enrollments: Vec<EnrollmentWithCourse>,
    pub attempts: Vec<AttemptSummary>,
}

// 按角色只填充其中一个
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub instructor: Option<InstructorDashboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub student: Option<StudentDashboard>,
}
