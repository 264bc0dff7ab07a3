/// 业务错误码
///
/// 通过 `code as i32` 写入 `ApiResponse.code`，0 表示成功。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserNameAlreadyExists = 2005,
    UserEmailAlreadyExists = 2006,

    // 课程
    CourseNotFound = 3000,
    CourseCreationFailed = 3001,
    CoursePermissionDenied = 3002,
    CourseInvalid = 3003,

    // 选课
    EnrollmentNotAllowed = 4000,
    NotEnrolled = 4001,

    // 课程内容
    ContentNotFound = 5000,
    ContentUploadFailed = 5001,
    FileTypeNotAllowed = 5002,
    FileSizeExceeded = 5003,
    MultifileUploadNotAllowed = 5004,
    FileNotFound = 5005,

    // 测验
    QuizNotFound = 6000,
    QuizInvalid = 6001,
    QuizPermissionDenied = 6002,

    // 测验记录
    AttemptNotFound = 7000,
    AttemptPermissionDenied = 7001,
}
