#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod question_bank;
pub mod time;

pub use error::Error;
pub use question_bank::QuestionBank;
pub use time::Clock;
