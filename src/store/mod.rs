pub mod session_store;

pub use session_store::{AnswerValue, SessionStore, StoreMode};
