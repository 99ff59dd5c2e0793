//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query identifiers arrive as strings and are parsed here so a bad
//! id produces a field-scoped `invalid_request` instead of Actix's default
//! plain-text 404.

use std::fmt::Display;

use serde_json::json;

use crate::domain::{AssetId, AssetTypeId, Error, InvalidEntityId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidField => "invalid_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Wrap a domain validation failure with the request field it came from.
pub(crate) fn invalid_field_error(field: FieldName, error: impl Display) -> Error {
    ValidationError::new(field.as_str(), error.to_string()).with_code(ErrorCode::InvalidField)
}

fn parse_id<T>(
    value: &str,
    field: FieldName,
    build: impl FnOnce(i64) -> Result<T, InvalidEntityId>,
) -> Result<T, Error> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|raw| build(raw).ok())
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn parse_asset_id(value: &str, field: FieldName) -> Result<AssetId, Error> {
    parse_id(value, field, AssetId::new)
}

pub(crate) fn parse_asset_type_id(value: &str, field: FieldName) -> Result<AssetTypeId, Error> {
    parse_id(value, field, AssetTypeId::new)
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_id(value, field, UserId::new)
}

pub(crate) fn parse_optional_user_id(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<UserId>, Error> {
    value.map(|raw| parse_user_id(raw, field)).transpose()
}

pub(crate) fn parse_optional_asset_id(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<AssetId>, Error> {
    value.map(|raw| parse_asset_id(raw, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    #[case("1", 1)]
    #[case(" 42 ", 42)]
    fn accepts_positive_ids(#[case] raw: &str, #[case] expected: i64) {
        let id = parse_asset_id(raw, ID).expect("valid id");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("")]
    #[case("99999999999999999999")]
    fn rejects_invalid_ids(#[case] raw: &str) {
        let err = parse_user_id(raw, ID).expect_err("invalid id");

        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "id");
        assert_eq!(details["value"], raw);
        assert_eq!(details["code"], "invalid_id");
    }

    #[rstest]
    fn optional_ids_pass_none_through() {
        assert_eq!(
            parse_optional_asset_id(None, FieldName::new("assetId")).expect("absent is fine"),
            None
        );
    }

    #[rstest]
    fn field_errors_carry_domain_message() {
        let err = invalid_field_error(FieldName::new("email"), "email must contain '@'");

        assert_eq!(err.message(), "email must contain '@'");
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "email");
        assert_eq!(details["code"], "invalid_field");
    }
}
