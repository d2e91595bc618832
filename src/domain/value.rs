use crate::domain::normalize::{self, DialPolicy};
use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Router account login.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// JSON field name used by the router's login endpoint (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Router account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// JSON field name used by the router's login endpoint (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by the router's send endpoint (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Message length in characters, as counted for SMS splitting.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination number in the router's canonical dial format (`number`).
///
/// The router rejects `+`-prefixed numbers, so the canonical form uses a `00`
/// international prefix (e.g. `0049151…`). Construction normalizes via
/// [`normalize::normalize`]; the router itself rejects numbers that are still
/// malformed after normalization.
pub struct DialNumber(String);

impl DialNumber {
    /// JSON field name used by the router's send endpoint (`number`).
    pub const FIELD: &'static str = "number";

    /// Normalize a raw number into the router's dial format.
    ///
    /// Fails only when the input is empty after trimming; everything else is
    /// passed through normalization unchecked.
    pub fn normalize(raw: &str, policy: &DialPolicy) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(normalize::normalize(raw, policy)))
    }

    /// Canonical dial string as sent to the router.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Modem identifier as the router's send endpoint expects it (`modem`).
///
/// Invariant: non-empty after trimming.
pub struct ModemId(String);

impl ModemId {
    /// JSON field name used by the router's send endpoint (`modem`).
    pub const FIELD: &'static str = "modem";

    /// Create a validated [`ModemId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Well-known slot used when the router's inventory comes back empty.
    ///
    /// TRB-series devices expose their primary modem at USB path `1-1.4`, so
    /// an empty or inconsistent inventory falls back to it instead of failing.
    pub fn fallback() -> Self {
        Self("1-1.4".to_owned())
    }

    /// Borrow the validated modem id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
