//! Error codes for the Squawk diagnostic system.
//!
//! Error codes are organized by failure category:
//! - `E1xx` - Structure errors
//! - `E2xx` - Schema errors
//! - `E3xx` - Timestamp format errors
//! - `E4xx` - Configuration value errors

use std::fmt;

/// Broad failure category of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The document's shape is wrong: malformed lines, headers or dialogue.
    Structure,
    /// Declarations contradict each other or the attribute rules.
    Schema,
    /// A marker value does not match its timestamp format.
    TimestampFormat,
    /// An attribute value does not parse.
    ConfigValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Structure => "structure error",
            ErrorKind::Schema => "schema error",
            ErrorKind::TimestampFormat => "timestamp format error",
            ErrorKind::ConfigValue => "config value error",
        };
        f.write_str(name)
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Malformed line.
    ///
    /// A line outside the dialogue section and outside waypoint groups is
    /// not of the form `key = value`.
    E100,

    /// Malformed section header.
    ///
    /// A `[` line is not closed, is empty, or names a section family without
    /// the required `.<name>` suffix.
    E101,

    /// Entry outside any section.
    E102,

    /// First dialogue entry is not a marker.
    ///
    /// Every dialogue must start with a timestamp marker line.
    E103,

    /// Unknown dialogue key.
    ///
    /// A dialogue line uses a key that is neither a speaker nor a meta entry.
    E104,

    /// Duplicate section.
    E105,

    /// Duplicate attribute within one section.
    E106,

    // =========================================================================
    // Schema Errors (E2xx)
    // =========================================================================
    /// Timing attribute on a non-timestamp type or entry.
    ///
    /// Only the `Timestamp` type and its entries may declare `format` or `cps`.
    E200,

    /// Visual attribute on a timestamp type or entry.
    ///
    /// `Timestamp` types and entries may not declare `position`, `color` or
    /// `background`.
    E201,

    /// Undefined type.
    E202,

    /// Duplicate type definition.
    ///
    /// A type name is declared twice, possibly across the speaker and meta
    /// type families.
    E203,

    // =========================================================================
    // Timestamp Format Errors (E3xx)
    // =========================================================================
    /// Empty timestamp.
    E300,

    /// Timestamp component count does not match the format.
    E301,

    /// Non-numeric timestamp component.
    E302,

    // =========================================================================
    // Configuration Value Errors (E4xx)
    // =========================================================================
    /// Invalid number.
    E400,

    /// Invalid integer.
    E401,

    /// Invalid boolean.
    ///
    /// Accepted values are `1`, `true`, `yes`, `on`, `0`, `false`, `no`, `off`.
    E402,

    /// Invalid color.
    E403,

    /// Unknown timestamp format.
    ///
    /// Supported formats are `ss`, `mm:ss` and `hh:mm:ss`.
    E404,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Structure errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            // Schema errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            // Timestamp format errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            // Configuration value errors
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
            ErrorCode::E402 => "E402",
            ErrorCode::E403 => "E403",
            ErrorCode::E404 => "E404",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            // Structure errors
            ErrorCode::E100 => "malformed line",
            ErrorCode::E101 => "malformed section header",
            ErrorCode::E102 => "entry outside any section",
            ErrorCode::E103 => "dialogue does not start with a marker",
            ErrorCode::E104 => "unknown dialogue key",
            ErrorCode::E105 => "duplicate section",
            ErrorCode::E106 => "duplicate attribute",
            // Schema errors
            ErrorCode::E200 => "timing attribute on non-timestamp declaration",
            ErrorCode::E201 => "visual attribute on timestamp declaration",
            ErrorCode::E202 => "undefined type",
            ErrorCode::E203 => "duplicate type definition",
            // Timestamp format errors
            ErrorCode::E300 => "empty timestamp",
            ErrorCode::E301 => "timestamp does not match format",
            ErrorCode::E302 => "non-numeric timestamp component",
            // Configuration value errors
            ErrorCode::E400 => "invalid number",
            ErrorCode::E401 => "invalid integer",
            ErrorCode::E402 => "invalid boolean",
            ErrorCode::E403 => "invalid color",
            ErrorCode::E404 => "unknown timestamp format",
        }
    }

    /// The failure category this code belongs to.
    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::E100
            | ErrorCode::E101
            | ErrorCode::E102
            | ErrorCode::E103
            | ErrorCode::E104
            | ErrorCode::E105
            | ErrorCode::E106 => ErrorKind::Structure,
            ErrorCode::E200 | ErrorCode::E201 | ErrorCode::E202 | ErrorCode::E203 => {
                ErrorKind::Schema
            }
            ErrorCode::E300 | ErrorCode::E301 | ErrorCode::E302 => ErrorKind::TimestampFormat,
            ErrorCode::E400
            | ErrorCode::E401
            | ErrorCode::E402
            | ErrorCode::E403
            | ErrorCode::E404 => ErrorKind::ConfigValue,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
        assert_eq!(ErrorCode::E404.to_string(), "E404");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E104.description(), "unknown dialogue key");
        assert_eq!(ErrorCode::E203.description(), "duplicate type definition");
    }

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::E103.kind(), ErrorKind::Structure);
        assert_eq!(ErrorCode::E202.kind(), ErrorKind::Schema);
        assert_eq!(ErrorCode::E301.kind(), ErrorKind::TimestampFormat);
        assert_eq!(ErrorCode::E403.kind(), ErrorKind::ConfigValue);
        assert_eq!(ErrorKind::Schema.to_string(), "schema error");
    }
}
