mod progress;
mod service;
mod timer;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{LOW_TIME_THRESHOLD_SECS, SessionProgress};
pub use service::{QuestionMode, QuizSession, SessionPhase};
pub use timer::{DEFAULT_TICK_PERIOD, SessionTimer};
pub use workflow::{QuizAttempt, QuizCompletion, QuizSessionService};
