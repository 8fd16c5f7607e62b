//! On/off controls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use vibecontrols_types::{Value, ValueKind};

use crate::error::{ControlError, ControlInvalidity};
use crate::protocol::{Control, ControlDefinition, ProduceControl, resolve_narrowed};
use crate::validation::{ClassValidator, CompositeValidator, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanWidget {
    Checkbox,
    Toggle,
    Radio,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BooleanHints {
    pub widget_preference: Option<BooleanWidget>,
    pub label: Option<String>,
    pub help_text: Option<String>,
}

/// Parameters for a [`BooleanDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BooleanInput {
    pub default: bool,
    pub optional: bool,
    pub validation_message: Option<String>,
    pub hints: BooleanHints,
}

/// Strictly boolean values: `0`, `1`, `"true"` and null are all rejected.
#[derive(Debug, Deserialize)]
#[serde(from = "BooleanInput")]
pub struct BooleanDefinition {
    default: bool,
    optional: bool,
    hints: BooleanHints,
    validator: CompositeValidator,
}

impl From<BooleanInput> for BooleanDefinition {
    fn from(input: BooleanInput) -> Self {
        let mut class = ClassValidator::new(ValueKind::Boolean);
        if let Some(message) = input.validation_message {
            class = class.with_message(message);
        }
        Self {
            default: input.default,
            optional: input.optional,
            hints: input.hints,
            validator: CompositeValidator::new().with(class),
        }
    }
}

impl Default for BooleanDefinition {
    fn default() -> Self {
        BooleanInput::default().into()
    }
}

impl BooleanDefinition {
    #[must_use]
    pub fn new(input: BooleanInput) -> Self {
        input.into()
    }

    #[must_use]
    pub const fn default_value(&self) -> bool {
        self.default
    }

    #[must_use]
    pub fn hints(&self) -> &BooleanHints {
        &self.hints
    }
}

impl ControlDefinition for BooleanDefinition {
    fn kind_name(&self) -> &'static str {
        "boolean"
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn validate_value(&self, value: &Value) -> Result<Value, ControlInvalidity> {
        self.validator.validate(value.clone())
    }

    fn produce_default(&self) -> Value {
        Value::Boolean(self.default)
    }

    fn serialize_value(&self, value: &Value) -> JsonValue {
        value.to_json()
    }
}

impl ProduceControl for BooleanDefinition {
    type Control = Boolean;

    fn produce_control(self: &Arc<Self>, initial: Option<Value>) -> Result<Boolean, ControlError> {
        let current = resolve_narrowed(&**self, initial, "boolean", |value| {
            value.as_bool().ok_or(value)
        })?;
        Ok(Boolean {
            definition: Arc::clone(self),
            current,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Boolean {
    definition: Arc<BooleanDefinition>,
    current: bool,
}

impl Boolean {
    #[must_use]
    pub const fn current(&self) -> bool {
        self.current
    }

    /// Same definition, negated value.
    #[must_use]
    pub fn toggle(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            current: !self.current,
        }
    }
}

impl PartialEq for Boolean {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) && self.current == other.current
    }
}

impl Control for Boolean {
    type Definition = BooleanDefinition;

    fn definition(&self) -> &Arc<BooleanDefinition> {
        &self.definition
    }

    fn current_value(&self) -> Value {
        Value::Boolean(self.current)
    }

    fn copy(&self, value: Value) -> Result<Self, ControlError> {
        self.definition.produce_control(Some(value))
    }
}
