pub mod address;
pub mod loaders;
pub mod question;
pub mod question_type;

pub use address::Address;
pub use loaders::load_catalog;
pub use question::{Catalog, Question, QuestionContent, Section};
pub use question_type::QuestionType;
