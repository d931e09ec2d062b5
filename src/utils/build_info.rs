/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One line per field, as printed by `cashflow_cli --version-info`.
    pub fn render(&self) -> String {
        [
            ("version", self.version),
            ("git", self.git_hash),
            ("tree", self.git_status),
            ("built", self.timestamp),
            ("target", self.target),
            ("profile", self.profile),
            ("rustc", self.rustc),
        ]
        .iter()
        .map(|(key, value)| format!("{key:<8} {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("CASHFLOW_CORE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("CASHFLOW_CORE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("CASHFLOW_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("CASHFLOW_CORE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("CASHFLOW_CORE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("CASHFLOW_CORE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn render_includes_crate_version() {
        let rendered = super::current().render();
        assert!(rendered.starts_with("version "));
        assert!(rendered.contains(env!("CARGO_PKG_VERSION")));
    }
}
