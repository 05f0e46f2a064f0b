// src/constants.rs

/// Status code expected from a data set that never had one set explicitly.
pub const DEFAULT_EXPECTED_STATUS_CODE: u16 = 200;

/// Value filled into every declared parameter that has no default of its own.
pub const DEFAULT_PLACEHOLDER: &str = "1";

/// Base URI the generated relative URIs are resolved against.
pub const DEFAULT_BASE_URI: &str = "http://localhost";

/// Heading that introduces the debug notes in skip and failure messages.
pub const DEBUG_NOTES_HEADER: &str = "Notes for this data set:";

/// Prefix of the environment variables read by `ConfigBuilder::from_env`.
pub const ENV_PREFIX: &str = "HTTP_SMOKE_";
