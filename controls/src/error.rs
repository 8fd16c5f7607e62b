//! Error taxonomy for definitions and controls.
//!
//! Everything converts into [`ControlError`], so callers can `?` any
//! operation into one root and still match on the specific kind:
//!
//! - [`ControlInvalidity`]: the value is wrong. Either the wrong kind
//!   ([`TypeInvalidity`]) or the right kind breaking a rule
//!   ([`ConstraintViolation`]).
//! - [`DefinitionInvalidity`]: a definition's own parameters contradict each
//!   other. Only raised while constructing a definition.
//! - [`IndexOutOfRange`] and [`InvalidPermutation`]: misuse of array
//!   operations, not constraint problems.
//! - [`IncrementOperationFailure`] and [`CycleOperationFailure`]: the
//!   operation does not apply to the control's configuration.

use std::fmt;

use thiserror::Error;
use vibecontrols_types::{Value, ValueKind};

// ── Invalidity ───────────────────────────────────────────────

/// Value has the wrong kind for the control.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TypeInvalidity {
    expected: String,
    actual: ValueKind,
    message: String,
}

impl TypeInvalidity {
    pub fn new(expected: impl Into<String>, actual: ValueKind) -> Self {
        let expected = expected.into();
        let message = format!("Value must be {expected} (got {actual}).");
        Self {
            expected,
            actual,
            message,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    #[must_use]
    pub const fn actual(&self) -> ValueKind {
        self.actual
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Length or element count outside the allowed range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SizeConstraintViolation {
    minimum: Option<usize>,
    maximum: Option<usize>,
    actual: usize,
    message: String,
}

impl SizeConstraintViolation {
    #[must_use]
    pub fn new(label: &str, minimum: Option<usize>, maximum: Option<usize>, actual: usize) -> Self {
        let message = match (minimum, maximum) {
            (Some(min), Some(max)) => {
                format!("{label} must be between {min} and {max} (got {actual}).")
            }
            (Some(min), None) => format!("{label} must be at least {min} (got {actual})."),
            (None, Some(max)) => format!("{label} must be at most {max} (got {actual})."),
            (None, None) => format!("{label} constraint violated (got {actual})."),
        };
        Self {
            minimum,
            maximum,
            actual,
            message,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub const fn minimum(&self) -> Option<usize> {
        self.minimum
    }

    #[must_use]
    pub const fn maximum(&self) -> Option<usize> {
        self.maximum
    }

    #[must_use]
    pub const fn actual(&self) -> usize {
        self.actual
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Number outside `[minimum, maximum]`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct BoundsConstraintViolation {
    minimum: f64,
    maximum: f64,
    actual: f64,
    message: String,
}

impl BoundsConstraintViolation {
    #[must_use]
    pub fn new(minimum: f64, maximum: f64, actual: f64) -> Self {
        Self {
            minimum,
            maximum,
            actual,
            message: format!("Value must be between {minimum} and {maximum} (got {actual})."),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
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
    pub const fn actual(&self) -> f64 {
        self.actual
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Number not on the `minimum + k * grade` lattice.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Value must be aligned to step {grade} from minimum {minimum} (got {actual}).")]
pub struct StepConstraintViolation {
    grade: f64,
    minimum: f64,
    actual: f64,
}

impl StepConstraintViolation {
    #[must_use]
    pub const fn new(grade: f64, minimum: f64, actual: f64) -> Self {
        Self {
            grade,
            minimum,
            actual,
        }
    }

    #[must_use]
    pub const fn grade(&self) -> f64 {
        self.grade
    }

    #[must_use]
    pub const fn minimum(&self) -> f64 {
        self.minimum
    }

    #[must_use]
    pub const fn actual(&self) -> f64 {
        self.actual
    }
}

/// Value is not one of the allowed choices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SelectionConstraintViolation {
    value: Value,
    message: String,
}

impl SelectionConstraintViolation {
    #[must_use]
    pub fn new(value: Value) -> Self {
        let message = format!("Value {value} is not in available choices.");
        Self { value, message }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Repeated element where uniqueness is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Duplicate element at index {index}.")]
pub struct UniquenessConstraintViolation {
    index: usize,
}

impl UniquenessConstraintViolation {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Index of the first element that repeats an earlier one.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Structurally valid value that breaks a specific rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintViolation {
    #[error(transparent)]
    Size(#[from] SizeConstraintViolation),
    #[error(transparent)]
    Bounds(#[from] BoundsConstraintViolation),
    #[error(transparent)]
    Step(#[from] StepConstraintViolation),
    #[error(transparent)]
    Selection(#[from] SelectionConstraintViolation),
    #[error(transparent)]
    Uniqueness(#[from] UniquenessConstraintViolation),
}

/// A value does not satisfy a definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlInvalidity {
    #[error(transparent)]
    Type(#[from] TypeInvalidity),
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}

impl ControlInvalidity {
    #[must_use]
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint(violation) => Some(violation),
            Self::Type(_) => None,
        }
    }
}

// ── Definition ───────────────────────────────────────────────

/// A definition's parameters are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DefinitionInvalidity {
    parameter: &'static str,
    issue: String,
    detail: Option<String>,
    message: String,
}

impl DefinitionInvalidity {
    pub fn new(parameter: &'static str, issue: impl Into<String>) -> Self {
        let issue = issue.into();
        let message = format!("Parameter '{parameter}' {issue}.");
        Self {
            parameter,
            issue,
            detail: None,
            message,
        }
    }

    /// A default value that fails the definition's own validation.
    #[must_use]
    pub fn rejected_default(parameter: &'static str, error: &ControlInvalidity) -> Self {
        Self::new(parameter, "is invalid").with_detail(error.to_string())
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message = format!("Parameter '{}' {}: {detail}", self.parameter, self.issue);
        self.detail = Some(detail);
        self
    }

    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        self.parameter
    }

    #[must_use]
    pub fn issue(&self) -> &str {
        &self.issue
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

// ── Operation failures ───────────────────────────────────────

/// Which grade step was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeStep {
    Increment,
    Decrement,
}

impl GradeStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
        }
    }
}

impl fmt::Display for GradeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot {step} interval without defined grade.")]
pub struct IncrementOperationFailure {
    step: GradeStep,
}

impl IncrementOperationFailure {
    #[must_use]
    pub const fn new(step: GradeStep) -> Self {
        Self { step }
    }

    #[must_use]
    pub const fn step(&self) -> GradeStep {
        self.step
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot cycle through multi-select options.")]
pub struct CycleOperationFailure;

/// Which array operation the index was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOperation {
    Access,
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub struct IndexOutOfRange {
    index: usize,
    length: usize,
    operation: IndexOperation,
}

impl IndexOutOfRange {
    #[must_use]
    pub const fn access(index: usize, length: usize) -> Self {
        Self {
            index,
            length,
            operation: IndexOperation::Access,
        }
    }

    #[must_use]
    pub const fn insertion(index: usize, length: usize) -> Self {
        Self {
            index,
            length,
            operation: IndexOperation::Insertion,
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn operation(&self) -> IndexOperation {
        self.operation
    }
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            IndexOperation::Access => write!(
                f,
                "Index {} is out of range for array of length {}.",
                self.index, self.length
            ),
            IndexOperation::Insertion => write!(
                f,
                "Index {} is out of range for insertion into array of length {}.",
                self.index, self.length
            ),
        }
    }
}

/// A reorder request that is not a permutation of `0..length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPermutation {
    #[error("Reorder indices must have length {expected} (got {actual}).")]
    WrongLength { expected: usize, actual: usize },
    #[error("Reorder index {index} is out of range for array of length {length}.")]
    OutOfRange { index: usize, length: usize },
    #[error("Reorder index {index} appears more than once.")]
    DuplicateIndex { index: usize },
}

// ── Root ─────────────────────────────────────────────────────

/// Root of every error raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error(transparent)]
    Invalidity(#[from] ControlInvalidity),
    #[error(transparent)]
    Definition(#[from] DefinitionInvalidity),
    #[error(transparent)]
    Increment(#[from] IncrementOperationFailure),
    #[error(transparent)]
    Cycle(#[from] CycleOperationFailure),
    #[error(transparent)]
    Index(#[from] IndexOutOfRange),
    #[error(transparent)]
    Permutation(#[from] InvalidPermutation),
}

impl ControlError {
    #[must_use]
    pub fn invalidity(&self) -> Option<&ControlInvalidity> {
        match self {
            Self::Invalidity(invalidity) => Some(invalidity),
            _ => None,
        }
    }

    #[must_use]
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        self.invalidity().and_then(ControlInvalidity::constraint)
    }
}

impl From<TypeInvalidity> for ControlError {
    fn from(error: TypeInvalidity) -> Self {
        Self::Invalidity(error.into())
    }
}

impl From<ConstraintViolation> for ControlError {
    fn from(error: ConstraintViolation) -> Self {
        Self::Invalidity(error.into())
    }
}

/// Lets each concrete violation `?` straight into the wider error types.
macro_rules! constraint_conversions {
    ($($violation:ty),+ $(,)?) => {
        $(
            impl From<$violation> for ControlInvalidity {
                fn from(error: $violation) -> Self {
                    Self::Constraint(error.into())
                }
            }

            impl From<$violation> for ControlError {
                fn from(error: $violation) -> Self {
                    Self::Invalidity(error.into())
                }
            }
        )+
    };
}

constraint_conversions!(
    SizeConstraintViolation,
    BoundsConstraintViolation,
    StepConstraintViolation,
    SelectionConstraintViolation,
    UniquenessConstraintViolation,
);
