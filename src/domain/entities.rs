//! Domain entities: core data structures

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::domain::DomainError;

/// Immutable view of the process environment, taken once per invocation.
///
/// Services receive a snapshot instead of reading `std::env` themselves, so the
/// same values are visible to every check and template of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Build a snapshot from explicit name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// True if the variable is set to a non-empty value.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    /// Variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Filesystem condition checked by `path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    Exists,
    Readable,
    Writable,
    Executable,
}

impl PathMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathMode::Exists => "exists",
            PathMode::Readable => "readable",
            PathMode::Writable => "writable",
            PathMode::Executable => "executable",
        }
    }
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a timeout given in (fractional) seconds into a `Duration`.
///
/// Rejects negative, NaN, infinite and out-of-range values.
pub fn parse_timeout(secs: f64) -> Result<Duration, DomainError> {
    Duration::try_from_secs_f64(secs).map_err(|_| DomainError::InvalidTimeout { value: secs })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string against a snapshot.
///
/// Unknown variables are left untouched.
pub fn expand_env_vars(path: &str, env: &EnvSnapshot) -> String {
    shellexpand::full_with_context_no_errors(
        path,
        || {
            directories::BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_string_lossy().into_owned())
        },
        |name| env.get(name),
    )
    .into_owned()
}
