use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::courses::{CourseQueryParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::quizzes::CreateQuizRequest;
use crate::models::users::entities::UserRole;
use crate::services::{ContentService, CourseService, EnrollmentService, QuizService};
use crate::utils::SafeCourseIdI64;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

// 课程目录
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

// 首页展示的最新课程，无需登录
pub async fn list_recent_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_recent_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

pub async fn get_course(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

pub async fn update_course(
    req: HttpRequest,
    path: SafeCourseIdI64,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, path.0).await
}

// 选课
pub async fn enroll(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(&req, path.0).await
}

// 退课
pub async fn unenroll(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.unenroll(&req, path.0).await
}

pub async fn list_contents(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_contents(&req, path.0).await
}

// 上传课程资料
pub async fn upload_content(
    req: HttpRequest,
    path: SafeCourseIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.upload_content(&req, path.0, payload).await
}

pub async fn list_quizzes(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req, path.0).await
}

pub async fn create_quiz(
    req: HttpRequest,
    path: SafeCourseIdI64,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, path.0, body.into_inner()).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    // 公开接口需先于带认证的 scope 注册
    cfg.service(
        web::resource("/api/v1/courses/recent").route(web::get().to(list_recent_courses)),
    );

    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 所有登录用户可浏览课程目录
                    .route(web::get().to(list_courses))
                    // 创建课程 - 仅讲师
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    // 修改与删除 - 仅讲师，归属在业务层检查
                    .route(
                        web::put()
                            .to(update_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{course_id}/enrollment")
                    .route(web::post().to(enroll))
                    .route(web::delete().to(unenroll))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            .service(
                web::resource("/{course_id}/contents")
                    .route(web::get().to(list_contents))
                    .route(
                        web::post()
                            .to(upload_content)
                            .wrap(RateLimit::file_upload())
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{course_id}/quizzes")
                    .route(web::get().to(list_quizzes))
                    .route(
                        web::post()
                            .to(create_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            ),
    );
}
