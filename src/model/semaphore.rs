/// Semaphore definitions for summarizing an audited URL
///
/// The semaphore is the traffic-light verdict written to the report.
use std::fmt;

/// Traffic-light classification of an audited URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semaphore {
    /// Page could not be fetched, did not return 200, or is marked noindex
    Red,

    /// Reserved middle state; no current input produces it
    Yellow,

    /// Page returned 200 and carries no blocking directive
    Green,
}

impl Semaphore {
    /// Returns the glyph written to the `Semaforo` report column
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Red => "🔴",
            Self::Yellow => "🟡",
            Self::Green => "🟢",
        }
    }

    /// Returns a lower-case name used in logs and statistics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    /// Returns all semaphore values, worst first
    pub fn all() -> [Self; 3] {
        [Self::Red, Self::Yellow, Self::Green]
    }
}

impl fmt::Display for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
