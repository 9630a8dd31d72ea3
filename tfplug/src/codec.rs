//! Conversions between configuration values and remote request payloads
//!
//! `Changes` compares the desired configuration with the last-known state and
//! yields a `WriteIntent` per attribute, so an update payload only carries
//! what actually changed.

use crate::error::{Result, TfplugError};
use crate::types::{AttributePath, Dynamic, State};
use chrono::{DateTime, SecondsFormat, Utc};

/// What to send for a single optional field
#[derive(Debug, Clone, PartialEq)]
pub enum WriteIntent<T> {
    /// Leave the field out of the payload
    Omit,
    Set(T),
    /// Send the field's empty value so the remote side unsets it
    Clear,
}

impl<T> Default for WriteIntent<T> {
    fn default() -> Self {
        WriteIntent::Omit
    }
}

impl<T> WriteIntent<T> {
    pub fn is_omit(&self) -> bool {
        matches!(self, WriteIntent::Omit)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WriteIntent<U> {
        match self {
            WriteIntent::Omit => WriteIntent::Omit,
            WriteIntent::Set(v) => WriteIntent::Set(f(v)),
            WriteIntent::Clear => WriteIntent::Clear,
        }
    }
}

impl<T: FormEncode> WriteIntent<T> {
    /// Form field value, or `None` when the field is omitted
    pub fn form_value(&self) -> Option<String> {
        match self {
            WriteIntent::Omit => None,
            WriteIntent::Set(v) => Some(v.encode()),
            WriteIntent::Clear => Some(T::cleared()),
        }
    }
}

/// Rendering of a value inside a form-encoded request body
pub trait FormEncode {
    fn encode(&self) -> String;
    /// The value that unsets the field remotely
    fn cleared() -> String;
}

impl FormEncode for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn cleared() -> String {
        String::new()
    }
}

impl FormEncode for i64 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn cleared() -> String {
        "0".to_string()
    }
}

impl FormEncode for bool {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn cleared() -> String {
        "false".to_string()
    }
}

/// Desired configuration paired with the last-known state, if any
pub struct Changes<'a> {
    prior: Option<&'a State>,
    desired: &'a State,
}

impl<'a> Changes<'a> {
    /// Every configured value counts as changed
    pub fn creating(desired: &'a State) -> Self {
        Self {
            prior: None,
            desired,
        }
    }

    pub fn updating(prior: &'a State, desired: &'a State) -> Self {
        Self {
            prior: Some(prior),
            desired,
        }
    }

    pub fn desired(&self) -> &State {
        self.desired
    }

    pub fn prior(&self) -> Option<&State> {
        self.prior
    }

    pub fn is_create(&self) -> bool {
        self.prior.is_none()
    }

    /// Remote identifier of the object being updated
    pub fn id(&self) -> Result<String> {
        self.prior
            .and_then(State::id)
            .or_else(|| self.desired.id())
            .ok_or_else(|| TfplugError::MissingAttribute("id".to_string()))
    }

    pub fn has_change(&self, key: &str) -> bool {
        let path = AttributePath::parse(key);
        let desired = self.desired.get(&path);
        match self.prior {
            None => desired.is_some(),
            Some(prior) => desired != prior.get(&path),
        }
    }

    /// True when the block or attribute is present in the desired configuration
    pub fn is_set(&self, key: &str) -> bool {
        self.desired.has(&AttributePath::parse(key))
    }

    /// Required value; fails when the configuration lacks it
    pub fn require_string(&self, key: &str) -> Result<String> {
        self.desired.get_string(&AttributePath::parse(key))
    }

    /// Optional string, cleared with an empty string when removed
    pub fn string(&self, key: &str) -> WriteIntent<String> {
        let path = AttributePath::parse(key);
        match self.desired.get(&path) {
            Some(Dynamic::String(value)) if self.has_change(key) => WriteIntent::Set(value.clone()),
            Some(_) => WriteIntent::Omit,
            None if self.has_change(key) => WriteIntent::Clear,
            None => WriteIntent::Omit,
        }
    }

    /// Optional string that the remote side cannot unset
    pub fn string_no_clear(&self, key: &str) -> WriteIntent<String> {
        match self.string(key) {
            WriteIntent::Clear => WriteIntent::Omit,
            intent => intent,
        }
    }

    /// JSON document, normalized before sending; formatting-only edits are no change
    pub fn json(&self, key: &str) -> WriteIntent<String> {
        let path = AttributePath::parse(key);
        let desired = self.desired.get(&path).and_then(Dynamic::as_str);
        let prior = self
            .prior
            .and_then(|p| p.get(&path))
            .and_then(Dynamic::as_str);

        match (desired, prior) {
            (Some(d), Some(p)) if self.prior.is_some() && json_equivalent(d, p) => WriteIntent::Omit,
            (Some(d), _) => WriteIntent::Set(normalize_json(d).unwrap_or_else(|_| d.to_string())),
            (None, Some(_)) => WriteIntent::Clear,
            (None, None) => WriteIntent::Omit,
        }
    }

    pub fn bool(&self, key: &str) -> WriteIntent<bool> {
        let path = AttributePath::parse(key);
        match self.desired.get_bool(&path) {
            Ok(value) if self.has_change(key) => WriteIntent::Set(value),
            _ => WriteIntent::Omit,
        }
    }

    /// Optional integer, reset to zero when removed
    pub fn int(&self, key: &str) -> WriteIntent<i64> {
        let path = AttributePath::parse(key);
        match self.desired.get_int(&path) {
            Ok(value) if self.has_change(key) => WriteIntent::Set(value),
            Ok(_) => WriteIntent::Omit,
            Err(_) if self.has_change(key) => WriteIntent::Clear,
            Err(_) => WriteIntent::Omit,
        }
    }

    /// List of strings sent as repeated form fields
    pub fn string_list(&self, key: &str) -> WriteIntent<Vec<String>> {
        let path = AttributePath::parse(key);
        match self.desired.get_string_list(&path) {
            Ok(values) if self.has_change(key) => WriteIntent::Set(values),
            Ok(_) => WriteIntent::Omit,
            Err(_) if self.has_change(key) => WriteIntent::Clear,
            Err(_) => WriteIntent::Omit,
        }
    }

    /// List of strings joined into one separated field
    pub fn separated(&self, key: &str, separator: &str) -> WriteIntent<String> {
        self.string_list(key)
            .map(|values| join_separated(&values, separator))
    }
}

/// Canonical timestamp rendering: RFC 3339, UTC, second precision
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Accepts both RFC 3339 (ISO 8601) and RFC 2822 server timestamps
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TfplugError::DecodingError(format!("invalid timestamp {:?}: {}", value, e)))
}

/// Re-serializes a JSON document with sorted keys and no insignificant whitespace
pub fn normalize_json(value: &str) -> Result<String> {
    let parsed: serde_json::Value = serde_json::from_str(value)
        .map_err(|e| TfplugError::DecodingError(format!("invalid JSON: {}", e)))?;
    serde_json::to_string(&parsed)
        .map_err(|e| TfplugError::EncodingError(format!("json encoding failed: {}", e)))
}

pub fn json_equivalent(a: &str, b: &str) -> bool {
    match (
        serde_json::from_str::<serde_json::Value>(a),
        serde_json::from_str::<serde_json::Value>(b),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn join_separated(values: &[String], separator: &str) -> String {
    values.join(separator)
}

pub fn split_separated(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(separator).map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state(values: &[(&str, Dynamic)]) -> State {
        let mut state = State::empty_object();
        for (name, value) in values {
            state
                .set_value(&AttributePath::parse(name), value.clone())
                .unwrap();
        }
        state
    }

    #[test]
    fn create_sets_every_configured_value() {
        let desired = state(&[
            ("friendly_name", "test".into()),
            ("secure", false.into()),
        ]);
        let changes = Changes::creating(&desired);

        assert_eq!(changes.string("friendly_name"), WriteIntent::Set("test".into()));
        assert_eq!(changes.bool("secure"), WriteIntent::Set(false));
        assert_eq!(changes.string("byoc_trunk_sid"), WriteIntent::Omit);
    }

    #[test]
    fn update_only_carries_changed_values() {
        let prior = state(&[
            ("id", "SD1".into()),
            ("domain_name", "a.sip.twilio.com".into()),
            ("friendly_name", "test".into()),
            ("secure", false.into()),
            ("sip_registration", false.into()),
        ]);
        let desired = state(&[
            ("domain_name", "a.sip.twilio.com".into()),
            ("friendly_name", "test".into()),
            ("secure", false.into()),
            ("sip_registration", true.into()),
        ]);
        let changes = Changes::updating(&prior, &desired);

        assert_eq!(changes.bool("sip_registration"), WriteIntent::Set(true));
        assert_eq!(changes.bool("secure"), WriteIntent::Omit);
        assert_eq!(changes.string("friendly_name"), WriteIntent::Omit);
        assert_eq!(changes.string("domain_name"), WriteIntent::Omit);
        assert_eq!(changes.id().unwrap(), "SD1");
    }

    #[test]
    fn removed_string_is_cleared() {
        let prior = state(&[("friendly_name", "test".into())]);
        let desired = state(&[]);
        let changes = Changes::updating(&prior, &desired);

        let intent = changes.string("friendly_name");
        assert_eq!(intent, WriteIntent::Clear);
        assert_eq!(intent.form_value().as_deref(), Some(""));
        assert_eq!(changes.string_no_clear("friendly_name"), WriteIntent::Omit);
    }

    #[test]
    fn removed_int_resets_to_zero() {
        let prior = state(&[("ttl", 30i64.into())]);
        let desired = state(&[]);
        let intent = Changes::updating(&prior, &desired).int("ttl");

        assert_eq!(intent.form_value().as_deref(), Some("0"));
    }

    #[test]
    fn json_formatting_changes_are_ignored() {
        let prior = state(&[("attributes", "{\"b\":1,\"a\":2}".into())]);
        let desired = state(&[("attributes", "{ \"a\": 2, \"b\": 1 }".into())]);

        assert_eq!(Changes::updating(&prior, &desired).json("attributes"), WriteIntent::Omit);

        let desired = state(&[("attributes", "{ \"a\": 3 }".into())]);
        assert_eq!(
            Changes::updating(&prior, &desired).json("attributes"),
            WriteIntent::Set("{\"a\":3}".into())
        );
    }

    #[test]
    fn nested_block_paths() {
        let prior = state(&[("voice.0.url", "https://a.example.com".into())]);
        let desired = state(&[("voice.0.url", "https://b.example.com".into())]);
        let changes = Changes::updating(&prior, &desired);

        assert!(changes.is_set("voice"));
        assert_eq!(
            changes.string("voice.0.url"),
            WriteIntent::Set("https://b.example.com".into())
        );
    }

    #[test]
    fn separated_list() {
        let desired = state(&[(
            "filters",
            Dynamic::from(vec!["onMessageAdded".to_string(), "onMessageRemoved".to_string()]),
        )]);

        assert_eq!(
            Changes::creating(&desired).separated("filters", ","),
            WriteIntent::Set("onMessageAdded,onMessageRemoved".into())
        );
        assert_eq!(
            split_separated("onMessageAdded, onMessageRemoved", ","),
            vec!["onMessageAdded", "onMessageRemoved"]
        );
        assert!(split_separated("", ",").is_empty());
    }

    #[test]
    fn timestamps_are_canonical_utc() {
        let expected = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();

        let iso = parse_timestamp("2021-03-04T05:06:07Z").unwrap();
        let rfc2822 = parse_timestamp("Thu, 04 Mar 2021 05:06:07 +0000").unwrap();
        assert_eq!(iso, expected);
        assert_eq!(rfc2822, expected);
        assert_eq!(format_timestamp(&rfc2822), "2021-03-04T05:06:07Z");

        assert!(parse_timestamp("yesterday").is_err());
    }
}
