//! Validated text fields for people, groups and roles.
//!
//! # Responsibility
//! - Normalize raw input into owned, trimmed text once, at construction.
//! - Reject malformed values with a field-specific [`ValidationError`].
//!
//! # Invariants
//! - A constructed field value always satisfies its shape rule.
//! - Inner whitespace runs in names are collapsed to one space.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// Token used for the implicit "no role" value in records and user input.
pub const DEFAULT_ROLE_TOKEN: &str = "default";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+(?: [\p{L}\p{N}]+)*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+(?:[+_.-][A-Za-z0-9]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Person name. Used as the weak identity of a person.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        parse_name("name", value.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = require_text("phone", value.as_ref())?;
        ensure_shape("phone", trimmed, &PHONE_RE)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = require_text("email", value.as_ref())?;
        ensure_shape("email", trimmed, &EMAIL_RE)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form postal address. Any non-blank text is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        require_text("address", value.as_ref()).map(|trimmed| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Group name. Unique across one roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupName(String);

impl GroupName {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        parse_name("group name", value.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of a role in a group catalog.
///
/// Never equal (case-insensitively) to [`DEFAULT_ROLE_TOKEN`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleName(String);

impl RoleName {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = parse_name("role name", value.as_ref())?;
        if is_default_token(&normalized) {
            return Err(ValidationError::ReservedRoleName(normalized));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Applies name normalization to lookup text without validating its shape.
///
/// Lookups by person or group name go through this so that `"Alice  Pauline"`
/// finds the person stored as `"Alice Pauline"`.
pub fn normalize_lookup(value: &str) -> Cow<'_, str> {
    WHITESPACE_RE.replace_all(value.trim(), " ")
}

/// Returns whether `value` spells the reserved default role token.
pub fn is_default_token(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(DEFAULT_ROLE_TOKEN)
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(Name, Phone, Email, Address, GroupName, RoleName);

fn require_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(trimmed)
}

fn ensure_shape(field: &'static str, value: &str, re: &Regex) -> Result<(), ValidationError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field,
            value: value.to_string(),
        })
    }
}

fn parse_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = require_text(field, value)?;
    let collapsed = WHITESPACE_RE.replace_all(trimmed, " ").into_owned();
    ensure_shape(field, &collapsed, &NAME_RE)?;
    Ok(collapsed)
}
