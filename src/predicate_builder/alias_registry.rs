//! Join-alias bookkeeping for one resolution request.
//!
//! Every traversal into a to-many association materialises as a join in
//! the assembled query. The registry hands out one alias per distinct
//! association path and caps how many joins a single request may create,
//! so an adversarial filter expression cannot fan out into an unbounded
//! join chain.

use std::collections::HashMap;

use super::errors::PredicateBuilderError;

/// Request-scoped association-path to join-alias map.
///
/// Owned by exactly one top-level resolution request. Never share an
/// instance between concurrent requests; create a fresh one per request
/// instead.
#[derive(Debug, Clone)]
pub struct AliasRegistry {
    aliases: HashMap<String, String>,
    max_joins: usize,
}

impl AliasRegistry {
    pub fn new(max_joins: usize) -> Self {
        AliasRegistry { aliases: HashMap::new(), max_joins }
    }

    /// Alias for an association path, creating one when the path is seen
    /// for the first time in this request.
    ///
    /// Repeated calls with the same path return the same alias. Creation
    /// past the join limit fails with `AssociationsLimitExceeded` before
    /// any alias is handed out.
    pub fn alias_for(&mut self, path: &str) -> Result<String, PredicateBuilderError> {
        if let Some(alias) = self.aliases.get(path) {
            return Ok(alias.clone());
        }
        if self.aliases.len() >= self.max_joins {
            return Err(PredicateBuilderError::AssociationsLimitExceeded {
                limit: self.max_joins,
            });
        }
        let alias = format!("a{}", self.aliases.len() + 1);
        log::debug!("creating association alias '{}' for path '{}'", alias, path);
        self.aliases.insert(path.to_string(), alias.clone());
        Ok(alias)
    }

    /// Number of aliases created so far in this request.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn max_joins(&self) -> usize {
        self.max_joins
    }
}
