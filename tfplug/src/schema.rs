//! Schema types and builders for tfplug
//!
//! This module provides the schema system for defining resource and data source
//! schemas: attribute types, nested blocks, defaults, force-new markers and
//! the static validation pass that runs before any remote call.

use crate::types::{AttributePath, Config, Diagnostic, Dynamic};
use crate::validator::Validator;
use std::collections::BTreeMap;
use std::sync::Arc;

/// AttributeType defines the type system for Terraform attributes
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number, // Always f64
    Bool,
    List(Box<AttributeType>),                // Ordered, allows duplicates
    Object(BTreeMap<String, AttributeType>), // Fixed structure
}

impl AttributeType {
    pub fn accepts(&self, value: &Dynamic) -> bool {
        match (self, value) {
            (_, Dynamic::Null) => true,
            (AttributeType::String, Dynamic::String(_)) => true,
            (AttributeType::Number, Dynamic::Number(_)) => true,
            (AttributeType::Bool, Dynamic::Bool(_)) => true,
            (AttributeType::List(element), Dynamic::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (AttributeType::Object(fields), Dynamic::Map(values)) => values
                .iter()
                .all(|(k, v)| fields.get(k).is_some_and(|t| t.accepts(v))),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::Object(_) => "object",
        }
    }
}

/// Schema is returned by resources and data sources
/// Version is used for state migration
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64,
    pub block: Block,
}

/// Block represents a configuration block
#[derive(Debug, Clone)]
pub struct Block {
    pub attributes: Vec<Attribute>,
    pub block_types: Vec<NestedBlock>,
    pub description: String,
    pub deprecated: bool,
}

/// Attribute represents a single configuration attribute
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// A change to this attribute needs destroy-then-create
    pub force_new: bool,
    pub validators: Vec<Arc<dyn Validator>>,
    pub default: Option<Dynamic>,
    /// Sibling attributes (including this one) of which exactly one must be set
    pub exactly_one_of: Vec<String>,
    pub deprecated: bool,
}

// Manual Debug implementation since validators don't implement Debug
impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field("force_new", &self.force_new)
            .field(
                "validators",
                &format!("{} validators", self.validators.len()),
            )
            .field("default", &self.default)
            .field("exactly_one_of", &self.exactly_one_of)
            .finish()
    }
}

impl Attribute {
    /// Computed-only attributes cannot appear in configuration
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// NestedBlock represents a nested configuration block
#[derive(Debug, Clone)]
pub struct NestedBlock {
    pub type_name: String,
    pub block: Block,
    pub nesting: NestingMode,
    pub min_items: usize,
    pub max_items: Option<usize>,
    /// Server fills the block when the configuration leaves it out
    pub computed: bool,
}

/// NestingMode defines how nested blocks are structured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NestingMode {
    Single,
    List,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attributes.iter().find(|a| a.name == name)
    }

    pub fn nested_block(&self, name: &str) -> Option<&NestedBlock> {
        self.block.block_types.iter().find(|b| b.type_name == name)
    }

    /// Paths of every force-new attribute, nested blocks included
    pub fn force_new_paths(&self) -> Vec<AttributePath> {
        let mut paths: Vec<AttributePath> = self
            .block
            .attributes
            .iter()
            .filter(|a| a.force_new)
            .map(|a| AttributePath::new(&a.name))
            .collect();
        for nested in &self.block.block_types {
            for attr in nested.block.attributes.iter().filter(|a| a.force_new) {
                paths.push(nested_path(nested, 0).attribute(&attr.name));
            }
        }
        paths
    }

    pub fn sensitive_attributes(&self) -> Vec<&Attribute> {
        self.block.attributes.iter().filter(|a| a.sensitive).collect()
    }

    /// Names of every top-level attribute and block the configuration may set
    pub fn configurable_names(&self) -> Vec<&str> {
        self.block
            .attributes
            .iter()
            .filter(|a| !a.is_computed_only())
            .map(|a| a.name.as_str())
            .chain(self.block.block_types.iter().map(|b| b.type_name.as_str()))
            .collect()
    }

    /// Fills unset optional attributes with their schema defaults
    pub fn apply_defaults(&self, config: &mut Config) {
        apply_block_defaults(&self.block, &AttributePath::root(), config);
        for nested in &self.block.block_types {
            let count = match config.get(&AttributePath::new(&nested.type_name)) {
                Some(Dynamic::List(items)) => items.len(),
                Some(Dynamic::Map(_)) => 1,
                _ => 0,
            };
            for idx in 0..count {
                apply_block_defaults(&nested.block, &nested_path(nested, idx), config);
            }
        }
    }

    /// Static validation of a configuration; never touches the network
    pub fn validate(&self, config: &Config) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        validate_block(&self.block, &AttributePath::root(), config, &mut diagnostics);

        for nested in &self.block.block_types {
            let path = AttributePath::new(&nested.type_name);
            let count = match (nested.nesting, config.get(&path)) {
                (_, None) => 0,
                (NestingMode::List, Some(Dynamic::List(items))) => {
                    if items.iter().any(|item| !matches!(item, Dynamic::Map(_))) {
                        diagnostics.push(
                            Diagnostic::error(
                                "Incorrect attribute value type",
                                format!("{} must be a list of blocks", path),
                            )
                            .with_attribute(path.clone()),
                        );
                        continue;
                    }
                    items.len()
                }
                (NestingMode::Single, Some(Dynamic::Map(_))) => 1,
                (_, Some(value)) => {
                    diagnostics.push(
                        Diagnostic::error(
                            "Incorrect attribute value type",
                            format!("{} must be a block, got {}", path, value.type_name()),
                        )
                        .with_attribute(path.clone()),
                    );
                    continue;
                }
            };

            if count < nested.min_items {
                diagnostics.push(
                    Diagnostic::error(
                        "Insufficient blocks",
                        format!(
                            "At least {} \"{}\" blocks are required",
                            nested.min_items, nested.type_name
                        ),
                    )
                    .with_attribute(path.clone()),
                );
            }
            if let Some(max) = nested.max_items {
                if count > max {
                    diagnostics.push(
                        Diagnostic::error(
                            "Too many blocks",
                            format!(
                                "No more than {} \"{}\" blocks are allowed",
                                max, nested.type_name
                            ),
                        )
                        .with_attribute(path.clone()),
                    );
                }
            }
            for idx in 0..count {
                validate_block(&nested.block, &nested_path(nested, idx), config, &mut diagnostics);
            }
        }

        diagnostics
    }
}

fn nested_path(nested: &NestedBlock, idx: usize) -> AttributePath {
    match nested.nesting {
        NestingMode::List => AttributePath::new(&nested.type_name).index(idx as i64),
        NestingMode::Single => AttributePath::new(&nested.type_name),
    }
}

fn child_path(prefix: &AttributePath, name: &str) -> AttributePath {
    prefix.clone().attribute(name)
}

fn apply_block_defaults(block: &Block, prefix: &AttributePath, config: &mut Config) {
    for attr in &block.attributes {
        if let Some(default) = &attr.default {
            let path = child_path(prefix, &attr.name);
            if !config.has(&path) {
                let _ = config.set_value(&path, default.clone());
            }
        }
    }
}

fn validate_block(
    block: &Block,
    prefix: &AttributePath,
    config: &Config,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut groups: Vec<&Vec<String>> = Vec::new();

    for attr in &block.attributes {
        let path = child_path(prefix, &attr.name);

        if !attr.exactly_one_of.is_empty() && !groups.contains(&&attr.exactly_one_of) {
            groups.push(&attr.exactly_one_of);
        }

        let value = match config.get(&path) {
            Some(value) => value,
            None => {
                if attr.required {
                    diagnostics.push(
                        Diagnostic::error(
                            "Missing required argument",
                            format!(
                                "The argument \"{}\" is required, but no definition was found.",
                                path
                            ),
                        )
                        .with_attribute(path),
                    );
                }
                continue;
            }
        };

        if attr.is_computed_only() {
            diagnostics.push(
                Diagnostic::error(
                    "Value for unconfigurable attribute",
                    format!("Can't configure a value for \"{}\": its value will be decided automatically based on the result of applying this configuration.", path),
                )
                .with_attribute(path),
            );
            continue;
        }

        if !attr.r#type.accepts(value) {
            diagnostics.push(
                Diagnostic::error(
                    "Incorrect attribute value type",
                    format!(
                        "Inappropriate value for attribute \"{}\": {} required, got {}.",
                        path,
                        attr.r#type.type_name(),
                        value.type_name()
                    ),
                )
                .with_attribute(path),
            );
            continue;
        }

        for validator in &attr.validators {
            validator.validate(value, &path, diagnostics);
        }
    }

    for group in groups {
        let specified: Vec<&str> = group
            .iter()
            .filter(|name| config.has(&child_path(prefix, name)))
            .map(String::as_str)
            .collect();
        let keys = group.join(",");
        match specified.len() {
            1 => {}
            0 => diagnostics.push(Diagnostic::error(
                "Invalid combination of arguments",
                format!("one of `{}` must be specified", keys),
            )),
            _ => diagnostics.push(Diagnostic::error(
                "Invalid combination of arguments",
                format!(
                    "only one of `{}` can be specified, but `{}` were specified.",
                    keys,
                    specified.join(",")
                ),
            )),
        }
    }
}

/// AttributeBuilder provides fluent API for building attributes
/// ALWAYS use this instead of constructing Attribute directly
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                force_new: false,
                validators: Vec::new(),
                default: None,
                exactly_one_of: Vec::new(),
                deprecated: false,
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    /// Mark as computed; combine with `optional` for server-defaulted values
    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Mark as sensitive (hidden)
    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.attribute.force_new = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.attribute.deprecated = true;
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attribute.validators.push(Arc::new(validator));
        self
    }

    /// Static default applied when the configuration leaves the attribute unset
    pub fn default(mut self, value: impl Into<Dynamic>) -> Self {
        self.attribute.default = Some(value.into());
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn exactly_one_of(mut self, names: &[&str]) -> Self {
        self.attribute.exactly_one_of = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// Builder for nested blocks such as `voice { ... }`
pub struct NestedBlockBuilder {
    block: NestedBlock,
}

impl NestedBlockBuilder {
    pub fn list(type_name: &str) -> Self {
        Self {
            block: NestedBlock {
                type_name: type_name.to_string(),
                block: Block {
                    attributes: Vec::new(),
                    block_types: Vec::new(),
                    description: String::new(),
                    deprecated: false,
                },
                nesting: NestingMode::List,
                min_items: 0,
                max_items: None,
                computed: false,
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.block.block.description = desc.to_string();
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.block.max_items = Some(max);
        self
    }

    pub fn computed(mut self) -> Self {
        self.block.computed = true;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.block.block.attributes.push(attr);
        self
    }

    pub fn build(self) -> NestedBlock {
        self.block
    }
}

/// SchemaBuilder provides fluent API for building schemas
/// ALWAYS use this for consistency
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                block: Block {
                    attributes: Vec::new(),
                    block_types: Vec::new(),
                    description: String::new(),
                    deprecated: false,
                },
            },
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.block.attributes.push(attr);
        self
    }

    pub fn block(mut self, block: NestedBlock) -> Self {
        self.schema.block.block_types.push(block);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.block.description = desc.to_string();
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.schema.block.deprecated = true;
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
