pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Choice, Question, Quiz, QuizDetail};
pub use requests::{
    CreateQuestionRequest, CreateQuizRequest, SubmitAnswersRequest, UpdateChoiceRequest,
    UpdateQuestionRequest, UpdateQuizRequest,
};
pub use responses::{ChoiceView, QuestionView, QuizDetailResponse, QuizListResponse};
