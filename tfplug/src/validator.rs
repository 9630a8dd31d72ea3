//! Attribute validators
//!
//! Validators run during the static validation pass. Every failure names the
//! attribute, the expected format and the offending value.

use regex::Regex;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::types::{AttributePath, Diagnostic, Dynamic};

pub trait Validator: Send + Sync {
    /// Human-readable description
    fn description(&self) -> String;
    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>);
}

fn invalid(path: &AttributePath, detail: String) -> Diagnostic {
    Diagnostic::error("Invalid attribute value", detail).with_attribute(path.clone())
}

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLengthValidator {
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl Validator for StringLengthValidator {
    fn description(&self) -> String {
        format!(
            "string length between {} and {}",
            self.min.unwrap_or(0),
            self.max.map_or("unbounded".to_string(), |m| m.to_string())
        )
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_str() else { return };
        let len = s.chars().count();
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);
        if too_short || too_long {
            diagnostics.push(invalid(
                path,
                format!(
                    "expected length of {} to be in the range ({} - {}), got {}",
                    path,
                    self.min.unwrap_or(0),
                    self.max.map_or("unbounded".to_string(), |m| m.to_string()),
                    s
                ),
            ));
        }
    }
}

/// Rejects the empty string
pub struct StringNotEmptyValidator;

impl Validator for StringNotEmptyValidator {
    fn description(&self) -> String {
        "non-empty string".to_string()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        if value.as_str().is_some_and(str::is_empty) {
            diagnostics.push(invalid(
                path,
                format!("expected \"{}\" to not be an empty string", path),
            ));
        }
    }
}

pub struct StringPatternValidator {
    pub pattern: Regex,
}

impl StringPatternValidator {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Validator for StringPatternValidator {
    fn description(&self) -> String {
        format!("string matching {}", self.pattern.as_str())
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        if let Some(s) = value.as_str() {
            if !self.pattern.is_match(s) {
                diagnostics.push(pattern_mismatch(path, self.pattern.as_str(), s));
            }
        }
    }
}

fn pattern_mismatch(path: &AttributePath, pattern: &str, value: &str) -> Diagnostic {
    invalid(
        path,
        format!(
            "expected value of {} to match regular expression \"{}\", got {}",
            path, pattern, value
        ),
    )
}

/// Compiles `pattern` once per process and hands out cheap clones
pub fn cached_regex(pattern: &str) -> Result<Regex, regex::Error> {
    static COMPILED: LazyLock<Mutex<HashMap<String, Regex>>> = LazyLock::new(Default::default);

    let mut compiled = COMPILED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = compiled.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern)?;
    compiled.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Checks a string against a pattern known only by its source text, as for
/// validators that must stay `const`-constructible
pub fn validate_pattern(
    pattern: &str,
    value: &Dynamic,
    path: &AttributePath,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(s) = value.as_str() else { return };
    match cached_regex(pattern) {
        Ok(regex) if regex.is_match(s) => {}
        Ok(_) => diagnostics.push(pattern_mismatch(path, pattern, s)),
        Err(e) => diagnostics.push(invalid(
            path,
            format!("invalid pattern \"{}\" for {}: {}", pattern, path, e),
        )),
    }
}

/// Fixed-prefix identifiers: two letters followed by 32 hex digits
pub struct SidValidator {
    prefix: &'static str,
}

impl SidValidator {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    pub fn pattern(&self) -> String {
        format!("^{}[0-9a-fA-F]{{32}}$", regex::escape(self.prefix))
    }

    pub fn is_valid(&self, value: &str) -> bool {
        cached_regex(&self.pattern()).is_ok_and(|regex| regex.is_match(value))
    }
}

impl Validator for SidValidator {
    fn description(&self) -> String {
        format!("SID matching {}", self.pattern())
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        validate_pattern(&self.pattern(), value, path, diagnostics);
    }
}

pub struct StringInSliceValidator {
    pub values: Vec<String>,
}

impl StringInSliceValidator {
    pub fn new(values: &[&str]) -> Self {
        Self {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl Validator for StringInSliceValidator {
    fn description(&self) -> String {
        format!("one of {:?}", self.values)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        if let Some(s) = value.as_str() {
            if !self.values.iter().any(|v| v == s) {
                diagnostics.push(invalid(
                    path,
                    format!("expected {} to be one of {:?}, got {}", path, self.values, s),
                ));
            }
        }
    }
}

/// Absolute URL with an http or https scheme
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn description(&self) -> String {
        "http or https URL".to_string()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_str() else { return };
        let valid = url::Url::parse(s)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !valid {
            diagnostics.push(invalid(
                path,
                format!(
                    "expected {} to have a url with schema of: \"http,https\", got {}",
                    path, s
                ),
            ));
        }
    }
}

/// String holding a JSON document
pub struct JsonStringValidator;

impl Validator for JsonStringValidator {
    fn description(&self) -> String {
        "valid JSON".to_string()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        if let Some(s) = value.as_str() {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(s) {
                diagnostics.push(invalid(
                    path,
                    format!("\"{}\" contains an invalid JSON: {}", path, e),
                ));
            }
        }
    }
}

pub struct NumberRangeValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validator for NumberRangeValidator {
    fn description(&self) -> String {
        format!("number between {:?} and {:?}", self.min, self.max)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        if let Dynamic::Number(n) = value {
            if let Some(min) = self.min {
                if *n < min {
                    diagnostics.push(invalid(
                        path,
                        format!("expected {} to be at least ({}), got {}", path, min, n),
                    ));
                }
            }
            if let Some(max) = self.max {
                if *n > max {
                    diagnostics.push(invalid(
                        path,
                        format!("expected {} to be at most ({}), got {}", path, max, n),
                    ));
                }
            }
        }
    }
}

/// Applies an inner validator to every element of a list
pub struct EachElementValidator<V> {
    pub inner: V,
}

impl<V: Validator> Validator for EachElementValidator<V> {
    fn description(&self) -> String {
        format!("each element: {}", self.inner.description())
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        if let Dynamic::List(items) = value {
            for (idx, item) in items.iter().enumerate() {
                self.inner
                    .validate(item, &path.clone().index(idx as i64), diagnostics);
            }
        }
    }
}
