//! Selection from a fixed, ordered list of choices.
//!
//! Single-select controls hold one choice. Multi-select controls hold a
//! non-empty list of distinct choices, in the order the user picked them.

use std::collections::HashSet;
use std::slice;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use vibecontrols_types::{Value, ValueKind};

use crate::error::{
    ControlError, ControlInvalidity, CycleOperationFailure, DefinitionInvalidity,
};
use crate::protocol::{Control, ControlDefinition, ProduceControl, resolve_initial};
use crate::validation::{
    ClassValidator, CompositeValidator, EachValidator, SelectionValidator, SizeValidator,
    UniquenessValidator, Validator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionsWidget {
    Select,
    Radio,
    Dropdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsHints {
    pub widget_preference: Option<OptionsWidget>,
    pub label: Option<String>,
    pub help_text: Option<String>,
}

/// Parameters for an [`OptionsDefinition`].
///
/// For multi-select, `default` is a list of choices.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsInput {
    pub choices: Vec<Value>,
    pub default: Value,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub validation_message: Option<String>,
    #[serde(default)]
    pub hints: OptionsHints,
}

impl OptionsInput {
    #[must_use]
    pub fn new<C: Into<Value>>(
        choices: impl IntoIterator<Item = C>,
        default: impl Into<Value>,
    ) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            default: default.into(),
            allow_multiple: false,
            optional: false,
            validation_message: None,
            hints: OptionsHints::default(),
        }
    }

    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "OptionsInput")]
pub struct OptionsDefinition {
    choices: Vec<Value>,
    default: Value,
    allow_multiple: bool,
    optional: bool,
    hints: OptionsHints,
    validator: CompositeValidator,
}

fn first_repeat(choices: &[Value]) -> Option<&Value> {
    let mut seen = HashSet::with_capacity(choices.len());
    choices.iter().find(|choice| !seen.insert(*choice))
}

impl TryFrom<OptionsInput> for OptionsDefinition {
    type Error = DefinitionInvalidity;

    fn try_from(input: OptionsInput) -> Result<Self, Self::Error> {
        Self::build(input)
            .inspect_err(|error| tracing::debug!(%error, "rejected options definition"))
    }
}

impl OptionsDefinition {
    pub fn new(input: OptionsInput) -> Result<Self, DefinitionInvalidity> {
        Self::try_from(input)
    }

    fn build(input: OptionsInput) -> Result<Self, DefinitionInvalidity> {
        if input.choices.is_empty() {
            return Err(DefinitionInvalidity::new("choices", "cannot be empty"));
        }
        if let Some(repeated) = first_repeat(&input.choices) {
            return Err(DefinitionInvalidity::new("choices", "must be unique")
                .with_detail(format!("{repeated} appears more than once")));
        }

        let selection = SelectionValidator::new(input.choices.iter().cloned());
        let validator = if input.allow_multiple {
            CompositeValidator::new()
                .with(ClassValidator::new(ValueKind::List))
                .with(SizeValidator::new(Some(1), None).with_label("Selection count"))
                .with(EachValidator::new(selection))
                .with(UniquenessValidator)
        } else {
            let selection = match input.validation_message {
                Some(message) => selection.with_message(message),
                None => selection,
            };
            CompositeValidator::new().with(selection)
        };

        let default = validator
            .validate(input.default)
            .map_err(|error| DefinitionInvalidity::rejected_default("default", &error))?;

        Ok(Self {
            choices: input.choices,
            default,
            allow_multiple: input.allow_multiple,
            optional: input.optional,
            hints: input.hints,
            validator,
        })
    }

    #[must_use]
    pub fn choices(&self) -> &[Value] {
        &self.choices
    }

    #[must_use]
    pub const fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    #[must_use]
    pub fn hints(&self) -> &OptionsHints {
        &self.hints
    }
}

impl ControlDefinition for OptionsDefinition {
    fn kind_name(&self) -> &'static str {
        "options"
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn validate_value(&self, value: &Value) -> Result<Value, ControlInvalidity> {
        self.validator.validate(value.clone())
    }

    fn produce_default(&self) -> Value {
        self.default.clone()
    }

    fn serialize_value(&self, value: &Value) -> JsonValue {
        value.to_json()
    }
}

impl ProduceControl for OptionsDefinition {
    type Control = Options;

    fn produce_control(self: &Arc<Self>, initial: Option<Value>) -> Result<Options, ControlError> {
        let current = resolve_initial(&**self, initial)?;
        Ok(Options {
            definition: Arc::clone(self),
            current,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    definition: Arc<OptionsDefinition>,
    current: Value,
}

impl Options {
    /// The selected choice, or the list of selected choices for multi-select.
    #[must_use]
    pub fn current(&self) -> &Value {
        &self.current
    }

    /// Selected choices as a slice, regardless of selection mode.
    #[must_use]
    pub fn selection(&self) -> &[Value] {
        match &self.current {
            Value::List(items) if self.definition.allow_multiple => items,
            single => slice::from_ref(single),
        }
    }

    #[must_use]
    pub fn is_selected(&self, choice: &Value) -> bool {
        self.selection().contains(choice)
    }

    /// Selects the following choice, wrapping to the first.
    pub fn cycle_next(&self) -> Result<Self, ControlError> {
        self.cycle(1)
    }

    /// Selects the preceding choice, wrapping to the last.
    pub fn cycle_previous(&self) -> Result<Self, ControlError> {
        let count = self.definition.choices.len();
        self.cycle(count - 1)
    }

    fn cycle(&self, offset: usize) -> Result<Self, ControlError> {
        if self.definition.allow_multiple {
            return Err(CycleOperationFailure.into());
        }
        let choices = &self.definition.choices;
        let position = choices
            .iter()
            .position(|choice| *choice == self.current)
            .unwrap_or_default();
        let target = choices[(position + offset) % choices.len()].clone();
        self.copy(target)
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) && self.current == other.current
    }
}

impl Control for Options {
    type Definition = OptionsDefinition;

    fn definition(&self) -> &Arc<OptionsDefinition> {
        &self.definition
    }

    fn current_value(&self) -> Value {
        self.current.clone()
    }

    fn copy(&self, value: Value) -> Result<Self, ControlError> {
        self.definition.produce_control(Some(value))
    }
}
