//! Non-fatal store outcomes.
//!
//! Reads that fail fall back to empty or default values and writes that fail
//! leave in-memory state as it was. Either way the caller gets the value plus
//! a notice it can show to the user.

use std::fmt;

use storage::repository::StorageError;

/// A degraded persistence outcome that did not stop the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreNotice {
    /// The store could not be read; defaults were used.
    ReadFailed { what: &'static str, detail: String },
    /// The store could not be written; the change was not saved.
    WriteFailed { what: &'static str, detail: String },
    /// A stored value could not be parsed; the default was used.
    Malformed { key: String, raw: String },
}

impl StoreNotice {
    #[must_use]
    pub fn read_failed(what: &'static str, err: &StorageError) -> Self {
        Self::ReadFailed {
            what,
            detail: err.to_string(),
        }
    }

    #[must_use]
    pub fn write_failed(what: &'static str, err: &StorageError) -> Self {
        Self::WriteFailed {
            what,
            detail: err.to_string(),
        }
    }

    #[must_use]
    pub fn malformed(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            raw: raw.into(),
        }
    }
}

impl fmt::Display for StoreNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { what, detail } => {
                write!(f, "could not load {what}, using defaults ({detail})")
            }
            Self::WriteFailed { what, detail } => {
                write!(f, "could not save {what} ({detail})")
            }
            Self::Malformed { key, raw } => {
                write!(f, "ignoring malformed value {raw:?} for {key}")
            }
        }
    }
}

/// A value together with the notices raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithNotice<T> {
    pub value: T,
    pub notices: Vec<StoreNotice>,
}

impl<T> WithNotice<T> {
    #[must_use]
    pub fn clean(value: T) -> Self {
        Self {
            value,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_notices(value: T, notices: Vec<StoreNotice>) -> Self {
        Self { value, notices }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }

    /// Drops the notices and returns the value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Moves this value's notices into `sink` and returns the value.
    pub fn drain_into(self, sink: &mut Vec<StoreNotice>) -> T {
        sink.extend(self.notices);
        self.value
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithNotice<U> {
        WithNotice {
            value: f(self.value),
            notices: self.notices,
        }
    }
}
