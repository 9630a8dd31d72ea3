//! Replacement detection for force-new attributes

use crate::schema::Schema;
use crate::types::{AttributePath, Config, State};

/// Force-new attributes whose configured value differs from the prior state
///
/// Attributes the configuration leaves unset are only reported when the
/// prior state held a value and the attribute is not server-computed.
pub fn requires_replace(schema: &Schema, prior: &State, config: &Config) -> Vec<AttributePath> {
    schema
        .force_new_paths()
        .into_iter()
        .filter(|path| {
            let computed = schema
                .attribute(&path.to_string())
                .is_some_and(|attr| attr.computed);
            match (prior.get(path), config.get(path)) {
                (Some(before), Some(after)) => before != after,
                (None, Some(_)) => true,
                (Some(_), None) => !computed,
                (None, None) => false,
            }
        })
        .collect()
}
