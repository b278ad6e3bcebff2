//! Build provenance, embedded by `build.rs` through vergen.
//!
//! Outside a git checkout every git field reads `"unknown"`.

use serde::Serialize;

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git branch at build time, or "unknown" if unavailable.
pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => "unknown",
};

/// Git commit SHA at build time, or "unknown" if unavailable.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Build timestamp, or "unknown" if unavailable.
pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

const SHORT_SHA_LEN: usize = 7;

/// Everything known about the running build, for `check` output and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub branch: &'static str,
    pub sha: &'static str,
    pub built_at: &'static str,
    pub dirty: bool,
}

impl BuildInfo {
    /// Provenance of this binary.
    pub fn current() -> Self {
        Self {
            version: PKG_VERSION,
            branch: GIT_BRANCH,
            sha: GIT_SHA,
            built_at: BUILD_TIMESTAMP,
            dirty: option_env!("VERGEN_GIT_DIRTY") == Some("true"),
        }
    }

    /// The commit SHA cut to seven characters.
    pub fn short_sha(&self) -> &'static str {
        self.sha.get(..SHORT_SHA_LEN).unwrap_or(self.sha)
    }
}

impl std::fmt::Display for BuildInfo {
    /// `{version}+{branch}.{sha}`, with `.dirty` appended for a dirty tree.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}.{}", self.version, self.branch, self.short_sha())?;
        if self.dirty {
            f.write_str(".dirty")?;
        }
        Ok(())
    }
}

/// Full version string, e.g. `0.1.0+main.abc1234` or `0.1.0+unknown.unknown`.
pub fn version_string() -> String {
    BuildInfo::current().to_string()
}
