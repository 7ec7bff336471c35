pub mod session;

pub use session::{InputOutcome, QuestionnaireSession};
