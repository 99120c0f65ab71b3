use std::fmt;

/// Source of the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// Request originated from API endpoint
    API,

    /// Request originated from CLI command
    CLI,

    /// Request originated from system (startup, tests)
    System,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestSource::API => "api",
            RequestSource::CLI => "cli",
            RequestSource::System => "system",
        };
        f.write_str(name)
    }
}
