//! Bounded numeric controls with an optional step grid.
//!
//! Values are stored as `f64`. Integers are accepted and widened; booleans
//! are not numbers. Bound and alignment checks share a tolerance of
//! [`EPSILON`] so that repeated `increment()` calls landing on
//! `0.7999999999999999` are still on the grid.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use vibecontrols_types::{Value, ValueKind};

use crate::error::{
    ControlError, ControlInvalidity, DefinitionInvalidity, GradeStep, IncrementOperationFailure,
};
use crate::protocol::{Control, ControlDefinition, ProduceControl, resolve_narrowed};
use crate::validation::{
    ClassValidator, CompositeValidator, EPSILON, GradeValidator, IntervalValidator, Validator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalWidget {
    Slider,
    Spinbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntervalHints {
    pub widget_preference: Option<IntervalWidget>,
    pub orientation: Option<IntervalOrientation>,
    pub show_ticks: bool,
    pub show_value: bool,
    pub label: Option<String>,
    pub help_text: Option<String>,
}

impl Default for IntervalHints {
    fn default() -> Self {
        Self {
            widget_preference: None,
            orientation: None,
            show_ticks: false,
            show_value: true,
            label: None,
            help_text: None,
        }
    }
}

/// Parameters for an [`IntervalDefinition`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalInput {
    pub minimum: f64,
    pub maximum: f64,
    pub default: f64,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub validation_message: Option<String>,
    #[serde(default)]
    pub hints: IntervalHints,
}

impl IntervalInput {
    #[must_use]
    pub fn new(minimum: f64, maximum: f64, default: f64) -> Self {
        Self {
            minimum,
            maximum,
            default,
            grade: None,
            optional: false,
            validation_message: None,
            hints: IntervalHints::default(),
        }
    }

    #[must_use]
    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "IntervalInput")]
pub struct IntervalDefinition {
    minimum: f64,
    maximum: f64,
    default: f64,
    grade: Option<f64>,
    optional: bool,
    hints: IntervalHints,
    validator: CompositeValidator,
}

fn finite(parameter: &'static str, number: f64) -> Result<f64, DefinitionInvalidity> {
    if number.is_finite() {
        Ok(number)
    } else {
        Err(DefinitionInvalidity::new(parameter, "must be finite").with_detail(number.to_string()))
    }
}

fn widen_to_float(value: Value) -> Result<Value, ControlInvalidity> {
    Ok(match value.as_number() {
        Some(number) => Value::Float(number),
        None => value,
    })
}

impl TryFrom<IntervalInput> for IntervalDefinition {
    type Error = DefinitionInvalidity;

    fn try_from(input: IntervalInput) -> Result<Self, Self::Error> {
        Self::build(input)
            .inspect_err(|error| tracing::debug!(%error, "rejected interval definition"))
    }
}

impl IntervalDefinition {
    pub fn new(input: IntervalInput) -> Result<Self, DefinitionInvalidity> {
        Self::try_from(input)
    }

    fn build(input: IntervalInput) -> Result<Self, DefinitionInvalidity> {
        let minimum = finite("minimum", input.minimum)?;
        let maximum = finite("maximum", input.maximum)?;
        let default = finite("default", input.default)?;
        if minimum > maximum {
            return Err(DefinitionInvalidity::new("minimum", "cannot exceed maximum")
                .with_detail(format!("{minimum} > {maximum}")));
        }
        let grade = input.grade.map(|grade| finite("grade", grade)).transpose()?;
        if let Some(grade) = grade
            && grade <= 0.0
        {
            return Err(DefinitionInvalidity::new("grade", "must be positive")
                .with_detail(grade.to_string()));
        }

        let mut class = ClassValidator::any_of([ValueKind::Integer, ValueKind::Float]);
        if let Some(message) = input.validation_message {
            class = class.with_message(message);
        }
        let mut validator = CompositeValidator::new()
            .with(class)
            .with(widen_to_float)
            .with(IntervalValidator::new(minimum, maximum).with_tolerance(EPSILON));
        if let Some(grade) = grade {
            validator = validator.with(GradeValidator::new(minimum, grade));
        }

        validator
            .validate(Value::Float(default))
            .map_err(|error| DefinitionInvalidity::rejected_default("default", &error))?;

        Ok(Self {
            minimum,
            maximum,
            default,
            grade,
            optional: input.optional,
            hints: input.hints,
            validator,
        })
    }

    #[must_use]
    pub const fn minimum(&self) -> f64 {
        self.minimum
    }

    #[must_use]
    pub const fn maximum(&self) -> f64 {
        self.maximum
    }

    #[must_use]
    pub const fn default_value(&self) -> f64 {
        self.default
    }

    /// Step size, or `None` for a continuous interval.
    #[must_use]
    pub const fn grade(&self) -> Option<f64> {
        self.grade
    }

    #[must_use]
    pub fn hints(&self) -> &IntervalHints {
        &self.hints
    }
}

impl ControlDefinition for IntervalDefinition {
    fn kind_name(&self) -> &'static str {
        "interval"
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn validate_value(&self, value: &Value) -> Result<Value, ControlInvalidity> {
        self.validator.validate(value.clone())
    }

    fn produce_default(&self) -> Value {
        Value::Float(self.default)
    }

    fn serialize_value(&self, value: &Value) -> JsonValue {
        value.to_json()
    }
}

impl ProduceControl for IntervalDefinition {
    type Control = Interval;

    fn produce_control(self: &Arc<Self>, initial: Option<Value>) -> Result<Interval, ControlError> {
        let current = resolve_narrowed(&**self, initial, "numeric", |value| {
            value.as_number().ok_or(value)
        })?;
        Ok(Interval {
            definition: Arc::clone(self),
            current,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Interval {
    definition: Arc<IntervalDefinition>,
    current: f64,
}

impl Interval {
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Moves up one grade step. No clamping: stepping past `maximum` fails.
    pub fn increment(&self) -> Result<Self, ControlError> {
        self.step(GradeStep::Increment)
    }

    /// Moves down one grade step. No clamping: stepping past `minimum` fails.
    pub fn decrement(&self) -> Result<Self, ControlError> {
        self.step(GradeStep::Decrement)
    }

    fn step(&self, step: GradeStep) -> Result<Self, ControlError> {
        let grade = self
            .definition
            .grade
            .ok_or(IncrementOperationFailure::new(step))?;
        let target = match step {
            GradeStep::Increment => self.current + grade,
            GradeStep::Decrement => self.current - grade,
        };
        tracing::trace!(operation = %step, from = self.current, to = target, "interval step");
        self.copy(Value::Float(target))
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) && self.current == other.current
    }
}

impl Control for Interval {
    type Definition = IntervalDefinition;

    fn definition(&self) -> &Arc<IntervalDefinition> {
        &self.definition
    }

    fn current_value(&self) -> Value {
        Value::Float(self.current)
    }

    fn copy(&self, value: Value) -> Result<Self, ControlError> {
        self.definition.produce_control(Some(value))
    }
}
