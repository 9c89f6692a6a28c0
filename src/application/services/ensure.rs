//! Environment presence checks

use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{DomainError, EnvSnapshot};

/// Service verifying that required environment variables are set.
///
/// A variable set to the empty string counts as absent.
pub struct EnsureService {
    env: Arc<EnvSnapshot>,
}

impl EnsureService {
    pub fn new(env: Arc<EnvSnapshot>) -> Self {
        Self { env }
    }

    /// Fail unless `name` is set and non-empty.
    pub fn ensure(&self, name: &str) -> ApplicationResult<()> {
        debug!("ensure: name={}", name);
        if self.env.is_present(name) {
            Ok(())
        } else {
            Err(DomainError::MissingVariable {
                name: name.to_string(),
            }
            .into())
        }
    }

    /// Fail unless at least one of `names` is set and non-empty.
    ///
    /// An empty list always fails.
    pub fn ensure_at_least_one(&self, names: &[String]) -> ApplicationResult<()> {
        debug!("ensure_at_least_one: names={:?}", names);
        match names.iter().find(|name| self.env.is_present(name)) {
            Some(found) => {
                debug!("found {}", found);
                Ok(())
            }
            None => Err(DomainError::NoneOfVariables {
                names: names.to_vec(),
            }
            .into()),
        }
    }
}
