//! Generic typed data container with pluggable validation
//!
//! A `GenericDataContainer` owns a single logical value whose shape is
//! fixed at construction. All mutation goes through [`GenericDataContainer::store`],
//! whose semantics branch on the declared shape: scalar shapes replace the
//! held value, lists append, tuples can be filled exactly once, and
//! mappings upsert under a required key. An optional [`DataValidator`]
//! gates every store.
//!
//! A failed store never mutates the held value: coercion and validation
//! run on a temporary and the payload is committed only on success.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::constants::SUPPORTED_DATA_KINDS;
use crate::error::{SharedError, SharedResult};
use crate::validation::{DataValidator, ValidatorKind};
use crate::value::Value;

/// The declared shape of a container's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// A single textual value (nullable)
    String,
    /// An append-only ordered collection
    List,
    /// An ordered collection that may be filled exactly once
    Tuple,
    /// A single integer
    Integer,
    /// A single floating-point number
    Float,
    /// A single exact decimal
    Decimal,
    /// A keyed collection
    Mapping,
}

impl DataKind {
    /// Canonical shape name, as accepted by [`DataKind::from_name`]
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::String => "str",
            DataKind::List => "list",
            DataKind::Tuple => "tuple",
            DataKind::Integer => "int",
            DataKind::Float => "float",
            DataKind::Decimal => "decimal",
            DataKind::Mapping => "dict",
        }
    }

    /// Resolve a shape from its name, for call sites where the shape
    /// arrives as data (configuration, stored metadata).
    pub fn from_name(name: &str) -> SharedResult<DataKind> {
        match name {
            "str" => Ok(DataKind::String),
            "list" => Ok(DataKind::List),
            "tuple" => Ok(DataKind::Tuple),
            "int" => Ok(DataKind::Integer),
            "float" => Ok(DataKind::Float),
            "decimal" => Ok(DataKind::Decimal),
            "dict" => Ok(DataKind::Mapping),
            other => Err(SharedError::Construction {
                message: format!(
                    "data kind \"{}\" is not one of the supported kinds: {:?}",
                    other, SUPPORTED_DATA_KINDS
                ),
            }),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape-typed payload held by a container
///
/// The variant always matches the container's declared [`DataKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerData {
    /// String shape; `None` when a null value was stored
    Text(Option<String>),
    /// List shape
    List(Vec<Value>),
    /// Tuple shape; `sealed` is set once the tuple has been filled
    Tuple { items: Vec<Value>, sealed: bool },
    /// Integer shape
    Integer(i64),
    /// Float shape
    Float(f64),
    /// Decimal shape
    Decimal(Decimal),
    /// Mapping shape
    Mapping(HashMap<String, Value>),
}

impl ContainerData {
    /// Borrow the textual payload, if present
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContainerData::Text(Some(s)) => Some(s),
            _ => None,
        }
    }

    /// Borrow the ordered items of a list or tuple payload
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            ContainerData::List(items) => Some(items),
            ContainerData::Tuple { items, .. } => Some(items),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer shape
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ContainerData::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The float payload, if this is a float shape
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ContainerData::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The decimal payload, if this is a decimal shape
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            ContainerData::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Borrow the entries of a mapping payload
    pub fn as_entries(&self) -> Option<&HashMap<String, Value>> {
        match self {
            ContainerData::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    fn zero_value(kind: DataKind) -> ContainerData {
        match kind {
            DataKind::String => ContainerData::Text(Some(String::new())),
            DataKind::List => ContainerData::List(Vec::new()),
            DataKind::Tuple => ContainerData::Tuple {
                items: Vec::new(),
                sealed: false,
            },
            DataKind::Integer => ContainerData::Integer(0),
            DataKind::Float => ContainerData::Float(0.0),
            DataKind::Decimal => ContainerData::Decimal(Decimal::ZERO),
            DataKind::Mapping => ContainerData::Mapping(HashMap::new()),
        }
    }
}

/// A data container for storing common value shapes with basic validation
pub struct GenericDataContainer {
    name: String,
    kind: DataKind,
    data: ContainerData,
    validator: Option<Box<dyn DataValidator>>,
}

impl fmt::Debug for GenericDataContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericDataContainer")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl GenericDataContainer {
    /// Create a container holding the shape's zero value
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        let name = name.into();
        debug!("container \"{}\" ready (shape: {})", name, kind);
        Self {
            name,
            kind,
            data: ContainerData::zero_value(kind),
            validator: None,
        }
    }

    /// Attach a validator that will gate every store
    pub fn with_validator(mut self, validator: Box<dyn DataValidator>) -> Self {
        info!(
            "container \"{}\" using a {:?} validator",
            self.name,
            validator.kind()
        );
        self.validator = Some(validator);
        self
    }

    /// Human-readable name, used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared shape of this container
    pub fn data_type(&self) -> DataKind {
        self.kind
    }

    /// The current shape-typed payload
    pub fn data(&self) -> &ContainerData {
        &self.data
    }

    /// Whether a validator is attached
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Store a value, applying the shape's semantics and any attached
    /// validator. Returns the resulting size: the string length for the
    /// string shape (0 when null), the new collection length for list,
    /// tuple and mapping shapes, and 1 for the numeric shapes.
    ///
    /// `key` is required for the mapping shape and ignored elsewhere.
    pub fn store(&mut self, value: Value, key: Option<&str>) -> SharedResult<usize> {
        match self.kind {
            DataKind::String => self.store_text(value),
            DataKind::List => self.store_list(value),
            DataKind::Tuple => self.store_tuple(value),
            DataKind::Integer => self.store_int(value),
            DataKind::Float => self.store_float(value),
            DataKind::Decimal => self.store_decimal(value),
            DataKind::Mapping => self.store_mapping(value, key),
        }
    }

    fn store_text(&mut self, value: Value) -> SharedResult<usize> {
        let string_validator = self
            .validator
            .as_ref()
            .filter(|v| v.kind() == ValidatorKind::String);

        if let Some(validator) = string_validator {
            if !validator.validate(&value) {
                return Err(SharedError::Validation {
                    message: format!("string validation failed for container \"{}\"", self.name),
                });
            }
            let stored = match value {
                Value::Null => None,
                Value::Text(s) => Some(s),
                other => Some(other.to_string()),
            };
            let length = stored.as_ref().map(|s| s.chars().count()).unwrap_or(0);
            self.data = ContainerData::Text(stored);
            return Ok(length);
        }

        if self.validator.is_none() {
            warn!(
                "no validator set - text value stored without validation in \"{}\"",
                self.name
            );
        }
        match value {
            Value::Null => {
                self.data = ContainerData::Text(None);
                Ok(0)
            }
            other => {
                let rendered = other.to_string();
                let length = rendered.chars().count();
                self.data = ContainerData::Text(Some(rendered));
                Ok(length)
            }
        }
    }

    fn store_list(&mut self, value: Value) -> SharedResult<usize> {
        if let Some(validator) = &self.validator {
            if !validator.validate(&value) {
                return Err(SharedError::Validation {
                    message: format!("list item validation failed in \"{}\"", self.name),
                });
            }
        } else {
            warn!(
                "no validator set - list value stored without validation in \"{}\"",
                self.name
            );
        }
        match &mut self.data {
            ContainerData::List(items) => {
                items.push(value);
                Ok(items.len())
            }
            _ => Err(SharedError::Internal {
                message: "list payload out of sync with declared shape".to_string(),
            }),
        }
    }

    fn store_tuple(&mut self, value: Value) -> SharedResult<usize> {
        let incoming = match value {
            Value::Null => {
                return Err(SharedError::Conversion {
                    message: "input data cannot be null - expecting a sequence".to_string(),
                })
            }
            Value::Seq(items) => items,
            other => {
                return Err(SharedError::Conversion {
                    message: format!("expecting a sequence but got \"{}\"", other.type_name()),
                })
            }
        };

        if matches!(self.data, ContainerData::Tuple { sealed: true, .. }) {
            return Err(SharedError::State {
                message: format!(
                    "tuple already set - create another container to store another tuple (container \"{}\")",
                    self.name
                ),
            });
        }

        if let Some(validator) = &self.validator {
            for (index, item) in incoming.iter().enumerate() {
                if !validator.validate(item) {
                    return Err(SharedError::Validation {
                        message: format!("tuple item validation failed on item number {index}"),
                    });
                }
            }
            debug!("all {} tuple items passed validation", incoming.len());
        }

        let count = incoming.len();
        self.data = ContainerData::Tuple {
            items: incoming,
            sealed: true,
        };
        Ok(count)
    }

    fn store_int(&mut self, value: Value) -> SharedResult<usize> {
        let coerced = coerce_int(&value)?;
        self.check_numeric_validator(&Value::Int(coerced))?;
        self.data = ContainerData::Integer(coerced);
        Ok(1)
    }

    fn store_float(&mut self, value: Value) -> SharedResult<usize> {
        let coerced = coerce_float(&value)?;
        self.check_numeric_validator(&Value::Float(coerced))?;
        self.data = ContainerData::Float(coerced);
        Ok(1)
    }

    fn store_decimal(&mut self, value: Value) -> SharedResult<usize> {
        let coerced = coerce_decimal(&value)?;
        self.check_numeric_validator(&Value::Decimal(coerced))?;
        self.data = ContainerData::Decimal(coerced);
        Ok(1)
    }

    fn store_mapping(&mut self, value: Value, key: Option<&str>) -> SharedResult<usize> {
        let key = key.ok_or_else(|| SharedError::State {
            message: format!(
                "expected a key value but found none (container \"{}\" shape is dict)",
                self.name
            ),
        })?;

        if let Some(validator) = &self.validator {
            if !validator.validate(&value) {
                return Err(SharedError::Validation {
                    message: format!("mapping value validation failed for key \"{key}\""),
                });
            }
            debug!("validation for value passed, key \"{}\"", key);
        } else {
            warn!(
                "no validator set - mapping value for key \"{}\" stored without validation",
                key
            );
        }

        match &mut self.data {
            ContainerData::Mapping(entries) => {
                if entries.contains_key(key) {
                    warn!(
                        "key \"{}\" already exists in mapping - old value was replaced",
                        key
                    );
                }
                entries.insert(key.to_string(), value);
                Ok(entries.len())
            }
            _ => Err(SharedError::Internal {
                message: "mapping payload out of sync with declared shape".to_string(),
            }),
        }
    }

    fn check_numeric_validator(&self, coerced: &Value) -> SharedResult<()> {
        if let Some(validator) = &self.validator {
            if validator.kind() != ValidatorKind::Numeric {
                return Err(SharedError::Validation {
                    message: format!(
                        "expected a numeric validator on container \"{}\"",
                        self.name
                    ),
                });
            }
            if !validator.validate(coerced) {
                return Err(SharedError::Validation {
                    message: format!("numeric validation failed for container \"{}\"", self.name),
                });
            }
        }
        Ok(())
    }
}

// Textual input goes through float parsing, so "42.9" stores 42.
// Truncation is toward zero, not rounding.
fn coerce_int(value: &Value) -> SharedResult<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(v) => Ok(*v as i64),
        Value::Text(s) => {
            let parsed: f64 = s.trim().parse().map_err(|_| SharedError::Conversion {
                message: format!("could not convert \"{s}\" to an integer"),
            })?;
            Ok(parsed as i64)
        }
        other => Err(SharedError::Conversion {
            message: format!(
                "expecting int, float or text input but got \"{}\"",
                other.type_name()
            ),
        }),
    }
}

fn coerce_float(value: &Value) -> SharedResult<f64> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(i) => Ok(*i as f64),
        Value::Text(s) => s.trim().parse().map_err(|_| SharedError::Conversion {
            message: format!("could not convert \"{s}\" to a float"),
        }),
        other => Err(SharedError::Conversion {
            message: format!(
                "could not convert input of type \"{}\" to a float",
                other.type_name()
            ),
        }),
    }
}

fn coerce_decimal(value: &Value) -> SharedResult<Decimal> {
    match value {
        Value::Decimal(d) => Ok(*d),
        Value::Int(i) => Ok(Decimal::from(*i)),
        Value::Float(v) => Decimal::from_f64(*v).ok_or_else(|| SharedError::Conversion {
            message: format!("could not convert {v} to a decimal"),
        }),
        Value::Text(s) => s.trim().parse().map_err(|_| SharedError::Conversion {
            message: format!("could not convert \"{s}\" to a decimal"),
        }),
        other => Err(SharedError::Conversion {
            message: format!(
                "could not convert input of type \"{}\" to a decimal",
                other.type_name()
            ),
        }),
    }
}
