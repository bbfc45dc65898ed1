use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored quiz result.
///
/// Derived from the student name, topic and completion timestamp, so it is
/// human readable but not guaranteed unique across same-millisecond attempts.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultId(String);

impl ResultId {
    /// Wraps an existing identifier verbatim.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the identifier for a freshly completed attempt:
    /// `{student}-{topic}-{iso timestamp}` with whitespace runs replaced by `-`.
    #[must_use]
    pub fn derive(student_name: &str, topic: &str, date: DateTime<Utc>) -> Self {
        Self::from_parts(student_name, topic, &iso_timestamp(date))
    }

    /// Builds the identifier for a legacy record stored without one.
    #[must_use]
    pub fn from_parts(student_name: &str, topic: &str, date: &str) -> Self {
        Self(dash_whitespace(&format!("{student_name}-{topic}-{date}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Formats a timestamp the way results are stamped: RFC 3339, millisecond
/// precision, `Z` suffix.
#[must_use]
pub fn iso_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Replaces each run of whitespace with a single `-`.
#[must_use]
pub fn dash_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

impl fmt::Debug for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultId({})", self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for parsing a `ResultId` from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError;

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("result id cannot be empty")
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ResultId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn derive_replaces_whitespace_runs() {
        let id = ResultId::derive("Ada  Lovelace", "Web Development", fixed_now());
        assert_eq!(
            id.as_str(),
            "Ada-Lovelace-Web-Development-2023-11-14T22:13:20.000Z"
        );
    }

    #[test]
    fn legacy_parts_use_stored_date_verbatim() {
        let id = ResultId::from_parts("Bo", "Machine Learning", "2024-01-02T03:04:05.000Z");
        assert_eq!(id.to_string(), "Bo-Machine-Learning-2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn from_str_rejects_blank() {
        assert!("   ".parse::<ResultId>().is_err());
        let id: ResultId = " abc ".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
