//! 预导入模块，方便使用

pub use super::attempt_answers::{
    ActiveModel as AttemptAnswerActiveModel, Entity as AttemptAnswers,
    Model as AttemptAnswerModel,
};
pub use super::attempts::{
    ActiveModel as AttemptActiveModel, Entity as Attempts, Model as AttemptModel,
};
pub use super::choices::{ActiveModel as ChoiceActiveModel, Entity as Choices, Model as ChoiceModel};
pub use super::contents::{
    ActiveModel as ContentActiveModel, Entity as Contents, Model as ContentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
