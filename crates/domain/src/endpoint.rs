//! Logical endpoints exposed by the remote controller.

use std::fmt;

/// A command or query understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Open,
    Close,
    Supply,
    Refill,
    Reset,
    SetThreshold,
    Status,
}

impl Endpoint {
    /// Every endpoint, commands first.
    pub const ALL: [Self; 7] = [
        Self::Open,
        Self::Close,
        Self::Supply,
        Self::Refill,
        Self::Reset,
        Self::SetThreshold,
        Self::Status,
    ];

    /// Path segment on the controller (`open`, `set-threshold`, …).
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Supply => "supply",
            Self::Refill => "refill",
            Self::Reset => "reset",
            Self::SetThreshold => "set-threshold",
            Self::Status => "status",
        }
    }

    /// Read-only endpoints have no side effect on the physical device.
    #[must_use]
    pub fn is_query(self) -> bool {
        matches!(self, Self::Status)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_kebab_case_paths() {
        assert_eq!(Endpoint::SetThreshold.path(), "set-threshold");
        assert_eq!(Endpoint::Open.to_string(), "open");
    }

    #[test]
    fn should_only_treat_status_as_query() {
        let queries: Vec<_> = Endpoint::ALL.into_iter().filter(|e| e.is_query()).collect();
        assert_eq!(queries, vec![Endpoint::Status]);
    }
}
