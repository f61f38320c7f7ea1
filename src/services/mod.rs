pub mod assignments;
pub mod classes;
pub mod grading;
pub mod questions;
pub mod submissions;
pub mod validator;

pub use assignments::AssignmentService;
pub use classes::ClassService;
pub use grading::GradingService;
pub use questions::QuestionService;
pub use submissions::SubmissionService;
