//! Dotted property view of prefixed environment variables
//!
//! `APP_DB_HOST=localhost` with prefix `APP_` becomes `db.host = localhost`.
//! Underscores that must survive are written as `~` in the variable name:
//! `APP_LOG~LEVEL` becomes `log_level`.

use std::collections::BTreeMap;

use crate::domain::EnvSnapshot;

/// Transform a variable name into a property key.
///
/// Removes every occurrence of `prefix` (not just the leading one), maps `_`
/// to `.`, then `~` to `_`, then lower-cases. `~` is substituted after `_`, so
/// it yields a literal underscore.
pub fn escape_prop(name: &str, prefix: &str) -> String {
    name.replace(prefix, "")
        .replace('_', ".")
        .replace('~', "_")
        .to_lowercase()
}

/// Collect every variable starting with `prefix` (and not in `exclude`) as a
/// property mapping.
///
/// A variable named exactly `prefix` yields the empty key. When two names map
/// to the same key the one sorting last wins.
pub fn env_to_props(
    env: &EnvSnapshot,
    prefix: &str,
    exclude: &[String],
) -> BTreeMap<String, String> {
    env.iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .filter(|(name, _)| !exclude.iter().any(|excluded| excluded == name))
        .map(|(name, value)| (escape_prop(name, prefix), value.to_string()))
        .collect()
}
