//! Composable value validators.
//!
//! A [`Validator`] takes ownership of a value and either hands it back
//! (possibly normalized) or explains why it is unacceptable. Definitions
//! assemble their rules once, at construction, into a
//! [`CompositeValidator`] and run every candidate value through it.
//!
//! Any `Fn(Value) -> Result<Value, ControlInvalidity>` closure is a validator,
//! so one-off rules do not need a named type.

use std::collections::HashSet;
use std::fmt;

use vibecontrols_types::{Value, ValueKind};

use crate::error::{
    BoundsConstraintViolation, ControlInvalidity, SelectionConstraintViolation,
    SizeConstraintViolation, StepConstraintViolation, TypeInvalidity,
    UniquenessConstraintViolation,
};

/// Tolerance for floating-point bound and step comparisons.
pub const EPSILON: f64 = 1e-10;

/// Choice lists longer than this are summarized by count in messages.
const MAX_CHOICES_IN_MESSAGE: usize = 5;

pub trait Validator: Send + Sync {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity>;
}

impl<F> Validator for F
where
    F: Fn(Value) -> Result<Value, ControlInvalidity> + Send + Sync,
{
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        self(value)
    }
}

// ── Class ────────────────────────────────────────────────────

/// Accepts values whose kind is one of `kinds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassValidator {
    kinds: Vec<ValueKind>,
    message: Option<String>,
}

impl ClassValidator {
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kinds: vec![kind],
            message: None,
        }
    }

    #[must_use]
    pub fn any_of(kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn kinds(&self) -> &[ValueKind] {
        &self.kinds
    }

    fn expected(&self) -> String {
        match self.kinds.as_slice() {
            [kind] => kind.to_string(),
            kinds => {
                let names: Vec<&str> = kinds.iter().map(|kind| kind.as_str()).collect();
                format!("one of: {}", names.join(", "))
            }
        }
    }
}

impl Validator for ClassValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        if self.kinds.contains(&value.kind()) {
            return Ok(value);
        }
        let error = TypeInvalidity::new(self.expected(), value.kind());
        Err(match &self.message {
            Some(message) => error.with_message(message.clone()),
            None => error,
        }
        .into())
    }
}

// ── Interval ─────────────────────────────────────────────────

/// Accepts numbers within `[minimum, maximum]`, widened by `tolerance`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalValidator {
    minimum: f64,
    maximum: f64,
    tolerance: f64,
    message: Option<String>,
}

impl IntervalValidator {
    #[must_use]
    pub const fn new(minimum: f64, maximum: f64) -> Self {
        Self {
            minimum,
            maximum,
            tolerance: 0.0,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for IntervalValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        let Some(number) = value.as_number() else {
            return Err(TypeInvalidity::new("numeric", value.kind()).into());
        };
        if number < self.minimum - self.tolerance || number > self.maximum + self.tolerance {
            let error = BoundsConstraintViolation::new(self.minimum, self.maximum, number);
            return Err(match &self.message {
                Some(message) => error.with_message(message.clone()),
                None => error,
            }
            .into());
        }
        Ok(value)
    }
}

// ── Size ─────────────────────────────────────────────────────

/// Accepts text or lists whose size lies within optional inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeValidator {
    minimum: Option<usize>,
    maximum: Option<usize>,
    label: String,
    message: Option<String>,
}

impl SizeValidator {
    #[must_use]
    pub fn new(minimum: Option<usize>, maximum: Option<usize>) -> Self {
        Self {
            minimum,
            maximum,
            label: "Length".to_owned(),
            message: None,
        }
    }

    /// Subject used in generated messages, e.g. "Array size".
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for SizeValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        let Some(size) = value.size() else {
            return Err(TypeInvalidity::new("text or list", value.kind()).into());
        };
        let too_small = self.minimum.is_some_and(|minimum| size < minimum);
        let too_large = self.maximum.is_some_and(|maximum| size > maximum);
        if too_small || too_large {
            let error = SizeConstraintViolation::new(&self.label, self.minimum, self.maximum, size);
            return Err(match &self.message {
                Some(message) => error.with_message(message.clone()),
                None => error,
            }
            .into());
        }
        Ok(value)
    }
}

// ── Selection ────────────────────────────────────────────────

/// Accepts members of a fixed choice set.
#[derive(Debug, Clone)]
pub struct SelectionValidator {
    members: HashSet<Value>,
    message: String,
}

impl SelectionValidator {
    #[must_use]
    pub fn new(choices: impl IntoIterator<Item = Value>) -> Self {
        let ordered: Vec<Value> = choices.into_iter().collect();
        let message = if ordered.len() <= MAX_CHOICES_IN_MESSAGE {
            let listed: Vec<String> = ordered.iter().map(ToString::to_string).collect();
            format!("Value must be one of: {}", listed.join(", "))
        } else {
            format!("Value must be one of {} allowed choices", ordered.len())
        };
        Self {
            members: ordered.into_iter().collect(),
            message,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains(value)
    }
}

impl Validator for SelectionValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        if self.members.contains(&value) {
            Ok(value)
        } else {
            Err(SelectionConstraintViolation::new(value)
                .with_message(self.message.clone())
                .into())
        }
    }
}

// ── Grade ────────────────────────────────────────────────────

/// Accepts numbers on the lattice `minimum + k * grade`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeValidator {
    minimum: f64,
    grade: f64,
}

impl GradeValidator {
    #[must_use]
    pub const fn new(minimum: f64, grade: f64) -> Self {
        Self { minimum, grade }
    }

    /// Whether `number` sits on the lattice, within [`EPSILON`] steps.
    #[must_use]
    pub fn is_aligned(&self, number: f64) -> bool {
        let steps = (number - self.minimum) / self.grade;
        (steps - steps.round()).abs() <= EPSILON
    }
}

impl Validator for GradeValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        let Some(number) = value.as_number() else {
            return Err(TypeInvalidity::new("numeric", value.kind()).into());
        };
        if self.is_aligned(number) {
            Ok(value)
        } else {
            Err(StepConstraintViolation::new(self.grade, self.minimum, number).into())
        }
    }
}

// ── Uniqueness ───────────────────────────────────────────────

/// Accepts lists with no repeated elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniquenessValidator;

impl Validator for UniquenessValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        let Some(items) = value.as_list() else {
            return Err(TypeInvalidity::new("list", value.kind()).into());
        };
        let mut seen = HashSet::with_capacity(items.len());
        if let Some(index) = items.iter().position(|item| !seen.insert(item)) {
            return Err(UniquenessConstraintViolation::new(index).into());
        }
        Ok(value)
    }
}

// ── Each ─────────────────────────────────────────────────────

/// Applies an inner validator to every element of a list.
///
/// Element errors propagate unchanged, so a nested constraint violation keeps
/// its kind.
#[derive(Debug, Clone)]
pub struct EachValidator<V> {
    inner: V,
}

impl<V: Validator> EachValidator<V> {
    #[must_use]
    pub const fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V: Validator> Validator for EachValidator<V> {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| self.inner.validate(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Err(TypeInvalidity::new("list", other.kind()).into()),
        }
    }
}

// ── Composite ────────────────────────────────────────────────

/// Runs validators in order, feeding each output into the next.
///
/// The first failure wins. An empty composite accepts everything.
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn Validator>>,
}

impl CompositeValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for CompositeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeValidator")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl Validator for CompositeValidator {
    fn validate(&self, value: Value) -> Result<Value, ControlInvalidity> {
        self.validators
            .iter()
            .try_fold(value, |value, validator| validator.validate(value))
    }
}
