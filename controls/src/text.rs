//! Free-text controls with optional character-count bounds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use vibecontrols_types::{Value, ValueKind};

use crate::error::{ControlError, ControlInvalidity, DefinitionInvalidity};
use crate::protocol::{Control, ControlDefinition, ProduceControl, resolve_narrowed};
use crate::validation::{ClassValidator, CompositeValidator, SizeValidator, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWidget {
    Input,
    Textarea,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextHints {
    pub widget_preference: Option<TextWidget>,
    pub multiline: bool,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub help_text: Option<String>,
}

/// Parameters for a [`TextDefinition`].
///
/// `default: None` means the empty string, which is exempt from the count
/// check at construction. An explicit default must satisfy the bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextInput {
    pub default: Option<String>,
    pub count_min: Option<usize>,
    pub count_max: Option<usize>,
    pub optional: bool,
    pub validation_message: Option<String>,
    pub hints: TextHints,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "TextInput")]
pub struct TextDefinition {
    default: String,
    count_min: Option<usize>,
    count_max: Option<usize>,
    optional: bool,
    hints: TextHints,
    validator: CompositeValidator,
}

impl TryFrom<TextInput> for TextDefinition {
    type Error = DefinitionInvalidity;

    fn try_from(input: TextInput) -> Result<Self, Self::Error> {
        Self::build(input)
            .inspect_err(|error| tracing::debug!(%error, "rejected text definition"))
    }
}

impl TextDefinition {
    pub fn new(input: TextInput) -> Result<Self, DefinitionInvalidity> {
        Self::try_from(input)
    }

    fn build(input: TextInput) -> Result<Self, DefinitionInvalidity> {
        if let (Some(min), Some(max)) = (input.count_min, input.count_max)
            && min > max
        {
            return Err(DefinitionInvalidity::new("count_min", "cannot exceed count_max")
                .with_detail(format!("{min} > {max}")));
        }

        let mut class = ClassValidator::new(ValueKind::Text);
        if let Some(message) = input.validation_message {
            class = class.with_message(message);
        }
        let mut validator = CompositeValidator::new().with(class);
        if input.count_min.is_some() || input.count_max.is_some() {
            validator = validator.with(
                SizeValidator::new(input.count_min, input.count_max)
                    .with_label("Text character count"),
            );
        }

        let default = match input.default {
            Some(text) => {
                validator
                    .validate(Value::Text(text.clone()))
                    .map_err(|error| DefinitionInvalidity::rejected_default("default", &error))?;
                text
            }
            None => String::new(),
        };

        Ok(Self {
            default,
            count_min: input.count_min,
            count_max: input.count_max,
            optional: input.optional,
            hints: input.hints,
            validator,
        })
    }

    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    #[must_use]
    pub const fn count_min(&self) -> Option<usize> {
        self.count_min
    }

    #[must_use]
    pub const fn count_max(&self) -> Option<usize> {
        self.count_max
    }

    #[must_use]
    pub fn hints(&self) -> &TextHints {
        &self.hints
    }
}

impl ControlDefinition for TextDefinition {
    fn kind_name(&self) -> &'static str {
        "text"
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn validate_value(&self, value: &Value) -> Result<Value, ControlInvalidity> {
        self.validator.validate(value.clone())
    }

    /// The configured default, or empty text when none was given.
    ///
    /// An absent default is not checked at construction, so with
    /// `count_min > 0` this returns a value `validate_value` rejects and
    /// `produce_control(None)` fails with a size violation.
    fn produce_default(&self) -> Value {
        Value::Text(self.default.clone())
    }

    fn serialize_value(&self, value: &Value) -> JsonValue {
        value.to_json()
    }
}

impl ProduceControl for TextDefinition {
    type Control = Text;

    fn produce_control(self: &Arc<Self>, initial: Option<Value>) -> Result<Text, ControlError> {
        let current = resolve_narrowed(&**self, initial, "text", Value::into_text)?;
        Ok(Text {
            definition: Arc::clone(self),
            current,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Text {
    definition: Arc<TextDefinition>,
    current: String,
}

impl Text {
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replaces the text with the empty string.
    ///
    /// Fails with a size violation when the definition has `count_min > 0`.
    pub fn clear(&self) -> Result<Self, ControlError> {
        self.copy(Value::Text(String::new()))
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) && self.current == other.current
    }
}

impl Control for Text {
    type Definition = TextDefinition;

    fn definition(&self) -> &Arc<TextDefinition> {
        &self.definition
    }

    fn current_value(&self) -> Value {
        Value::Text(self.current.clone())
    }

    fn copy(&self, value: Value) -> Result<Self, ControlError> {
        self.definition.produce_control(Some(value))
    }
}
