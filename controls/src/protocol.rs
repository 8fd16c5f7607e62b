//! Contracts shared by every control type.
//!
//! A *definition* is an immutable description: constraints, default value and
//! presentation hints. A *control* pairs a shared definition with one current
//! value. Controls never change in place; every operation produces a new
//! control whose value has been re-validated against the same definition.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use vibecontrols_types::Value;

use crate::error::{ControlError, ControlInvalidity, TypeInvalidity};

/// Object-safe view of a definition, used where the concrete type is erased
/// (array element definitions).
pub trait ControlDefinition: fmt::Debug + Send + Sync {
    /// Short name of the control type, e.g. `"interval"`.
    fn kind_name(&self) -> &'static str;

    /// Presentation flag: whether users may switch the control off.
    /// Never consulted during validation.
    fn is_optional(&self) -> bool;

    /// Validates and normalizes `value`.
    fn validate_value(&self, value: &Value) -> Result<Value, ControlInvalidity>;

    fn produce_default(&self) -> Value;

    /// JSON rendition of a value this definition has validated.
    fn serialize_value(&self, value: &Value) -> JsonValue;
}

/// Definitions that know which control type they produce.
pub trait ProduceControl: ControlDefinition + Sized {
    type Control: Control<Definition = Self>;

    /// Builds a control from `initial`, or from the default when `None`.
    ///
    /// The resolved value is always validated, so `Some(Value::Null)` fails
    /// like any other value of the wrong kind.
    fn produce_control(
        self: &Arc<Self>,
        initial: Option<Value>,
    ) -> Result<Self::Control, ControlError>;
}

/// A definition paired with a current, validated value.
pub trait Control: Clone + fmt::Debug + Send + Sync {
    type Definition: ControlDefinition;

    fn definition(&self) -> &Arc<Self::Definition>;

    fn current_value(&self) -> Value;

    /// New control from the same definition holding `value`.
    fn copy(&self, value: Value) -> Result<Self, ControlError>;

    fn serialize(&self) -> JsonValue {
        self.definition().serialize_value(&self.current_value())
    }
}

/// Resolves and validates the initial value for `produce_control`.
pub(crate) fn resolve_initial<D: ControlDefinition + ?Sized>(
    definition: &D,
    initial: Option<Value>,
) -> Result<Value, ControlError> {
    let candidate = initial.unwrap_or_else(|| definition.produce_default());
    definition
        .validate_value(&candidate)
        .inspect_err(|error| {
            tracing::trace!(kind = definition.kind_name(), %error, "rejected control value");
        })
        .map_err(ControlError::from)
}

/// Like [`resolve_initial`] but hands back the control's native form.
///
/// `narrow` returns the value unchanged when it is not of the expected shape,
/// which surfaces as a type error rather than a silent fallback.
pub(crate) fn resolve_narrowed<D, T>(
    definition: &D,
    initial: Option<Value>,
    expected: &str,
    narrow: impl FnOnce(Value) -> Result<T, Value>,
) -> Result<T, ControlError>
where
    D: ControlDefinition + ?Sized,
{
    narrow(resolve_initial(definition, initial)?)
        .map_err(|other| TypeInvalidity::new(expected, other.kind()).into())
}
