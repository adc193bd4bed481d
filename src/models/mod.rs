pub mod answer;
pub mod definition;
pub mod question;
pub mod statute;
pub mod validation;

pub use answer::{Answer, Answers};
pub use definition::InterviewDefinition;
pub use question::{Branch, FollowUp, Question, QuestionKind};
pub use statute::{Resolution, StatuteMatch};
pub use validation::{AnswerError, StructureError, ValidationError};
