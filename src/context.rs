//! Application context gating
//!
//! The grammar is only live while one of a fixed set of executables owns
//! the foreground window. Detecting the foreground process is the host's
//! job; callers pass the executable name they observed and we match it.

/// A set of executable names the grammar is active for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    executables: Vec<String>,
}

impl AppContext {
    pub fn new<I, S>(executables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            executables: executables
                .into_iter()
                .map(|e| normalize(e.as_ref()))
                .collect(),
        }
    }

    /// Combine two contexts; the result matches either.
    pub fn union(mut self, other: AppContext) -> AppContext {
        self.executables.extend(other.executables);
        self
    }

    /// Case-insensitive match on the executable basename, with or without
    /// a trailing `.exe`.
    pub fn matches(&self, executable: &str) -> bool {
        let candidate = normalize(executable);
        self.executables.iter().any(|e| *e == candidate)
    }

    pub fn is_empty(&self) -> bool {
        self.executables.is_empty()
    }
}

fn normalize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let base = base.to_lowercase();
    base.strip_suffix(".exe").map(str::to_string).unwrap_or(base)
}
