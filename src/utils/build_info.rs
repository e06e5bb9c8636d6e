/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    pub fn summary(&self) -> String {
        format!(
            "budget_planner {} ({} {}, {} build, {})",
            self.version, self.git_hash, self.git_status, self.profile, self.timestamp
        )
    }
}

/// CLI semantic version derived from the crate metadata.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("BUDGET_PLANNER_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("BUDGET_PLANNER_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("BUDGET_PLANNER_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("BUDGET_PLANNER_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("BUDGET_PLANNER_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_version() {
        let meta = current();
        assert!(meta.summary().contains(CLI_VERSION));
    }
}
