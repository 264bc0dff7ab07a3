use std::sync::Arc;

use crate::models::{
    attempts::entities::{Attempt, AttemptAnswer, AttemptSummary, NewAttempt},
    contents::entities::{Content, NewContent},
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    dashboard::InstructorDashboard,
    enrollments::entities::{Enrollment, EnrollmentWithCourse},
    quizzes::{
        entities::{Quiz, QuizDetail},
        requests::{CreateQuizRequest, UpdateQuizRequest},
    },
    users::entities::{NewUser, User},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, instructor_id: i64, course: CreateCourseRequest)
    -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 分页列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 最新创建的课程
    async fn list_recent_courses(&self, limit: u64) -> Result<Vec<Course>>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除资料、测验、选课）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课方法
    // 选课，已选过则返回原记录，bool 表示是否新建
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<(Enrollment, bool)>;
    // 退课
    async fn unenroll_student(&self, student_id: i64, course_id: i64) -> Result<bool>;
    // 获取选课记录
    async fn get_enrollment(&self, student_id: i64, course_id: i64)
    -> Result<Option<Enrollment>>;
    // 学生的全部选课（附课程信息）
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentWithCourse>>;

    /// 课程资料方法
    // 记录已上传的资料
    async fn create_content(&self, content: NewContent) -> Result<Content>;
    // 通过ID获取资料
    async fn get_content_by_id(&self, content_id: i64) -> Result<Option<Content>>;
    // 列出课程资料
    async fn list_course_contents(&self, course_id: i64) -> Result<Vec<Content>>;
    // 删除资料记录
    async fn delete_content(&self, content_id: i64) -> Result<bool>;

    /// 测验方法
    // 创建测验（含题目与选项，单事务）
    async fn create_quiz(&self, course_id: i64, quiz: CreateQuizRequest) -> Result<QuizDetail>;
    // 通过ID获取测验
    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>>;
    // 获取测验及全部题目、选项
    async fn get_quiz_detail(&self, quiz_id: i64) -> Result<Option<QuizDetail>>;
    // 列出课程测验
    async fn list_course_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>>;
    // 更新测验
    async fn update_quiz(&self, quiz_id: i64, update: UpdateQuizRequest)
    -> Result<Option<QuizDetail>>;
    // 删除测验
    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool>;

    /// 作答方法
    // 记录作答（作答与明细同一事务）
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<Attempt>;
    // 通过ID获取作答
    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<Attempt>>;
    // 作答明细
    async fn list_attempt_answers(&self, attempt_id: i64) -> Result<Vec<AttemptAnswer>>;
    // 学生的全部作答，最新在前
    async fn list_student_attempts(&self, student_id: i64) -> Result<Vec<AttemptSummary>>;

    /// 仪表盘
    async fn get_instructor_dashboard(&self, instructor_id: i64) -> Result<InstructorDashboard>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
