pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::Course;
pub use requests::{CourseListQuery, CourseQueryParams, CreateCourseRequest, UpdateCourseRequest};
pub use responses::{CourseDetailResponse, CourseListResponse};
