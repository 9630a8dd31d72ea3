//! Helpers for flattening API responses into Terraform state

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tfplug::codec::format_timestamp;
use tfplug::{AttributePath, Dynamic, Result, State};

/// Required string attribute of a state or configuration
pub fn required(state: &State, name: &str) -> Result<String> {
    state.get_string(&AttributePath::new(name))
}

/// Optional string attribute; empty strings count as unset
pub fn optional(state: &State, name: &str) -> Option<String> {
    state
        .get_string(&AttributePath::new(name))
        .ok()
        .filter(|value| !value.is_empty())
}

/// Canonical rendering of a server timestamp
pub fn timestamp(value: &DateTime<Utc>) -> Dynamic {
    Dynamic::String(format_timestamp(value))
}

/// Writes `date_created` and `date_updated`; a missing update time removes
/// the attribute instead of storing an empty string
pub fn set_dates(
    state: &mut State,
    created: &DateTime<Utc>,
    updated: Option<&DateTime<Utc>>,
) -> Result<()> {
    state.set_value(&AttributePath::new("date_created"), timestamp(created))?;
    state.set_optional(&AttributePath::new("date_updated"), updated.map(timestamp))
}

/// Object built from optional fields; `None` entries are left out
pub fn object<'a>(fields: impl IntoIterator<Item = (&'a str, Option<Dynamic>)>) -> Dynamic {
    Dynamic::Map(
        fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect::<BTreeMap<_, _>>(),
    )
}
