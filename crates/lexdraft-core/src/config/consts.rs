//! Defaults shared by the engine components

/// Cascade engine limits
pub mod cascade {
    /// Recursion ceiling for a single cascade chain
    pub const MAX_DEPTH: usize = 20;
}

/// Validation limits
pub mod validation {
    /// Compiled patterns kept in the regex LRU cache
    pub const REGEX_CACHE_SIZE: usize = 100;

    /// Patterns longer than this are rejected without compiling
    pub const MAX_PATTERN_LENGTH: usize = 200;
}

/// Template rendering limits
pub mod render {
    /// Compiled templates kept in the LRU cache
    pub const TEMPLATE_CACHE_SIZE: usize = 50;

    /// Wall-clock budget for a single render, in milliseconds
    pub const TIMEOUT_MS: u64 = 10_000;

    pub const DEFAULT_DATE_FORMAT: &str = "MMMM D, YYYY";
}

/// Caption defaults
pub mod parties {
    pub const DEFAULT_VERSUS: &str = "v.";
}
