//! Dispatcher configuration
//!
//! Built once at startup and passed by value into each
//! [`Dispatcher`](crate::parser::Dispatcher).

/// Environment variable read by [`DispatchConfig::from_env`]
pub const TRACE_ENV_VAR: &str = "CFG_DISPATCH_TRACE";

/// Settings shared by every dispatch in one parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Trace parser activations and mirror the setting into each grammar's
    /// debug flag
    pub trace: bool,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Read settings from the process environment.
    ///
    /// `CFG_DISPATCH_TRACE` enables tracing for any value other than empty,
    /// `0`, `false`, `no` or `off`.
    pub fn from_env() -> Self {
        let trace = std::env::var(TRACE_ENV_VAR)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Self { trace }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
