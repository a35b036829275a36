//! Question generation: vocabulary, distractor sampling and the shuffled queue.

pub mod question;
pub mod queue;
pub mod sampler;
pub mod vocabulary;

pub use question::{AnswerSlot, Question, CHOICES};
pub use queue::QuestionQueue;
pub use vocabulary::TagVocabulary;
