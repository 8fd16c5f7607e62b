//! Immutable, validated UI control definitions and values.
//!
//! Each control type is a pair:
//!
//! - a *definition* (`BooleanDefinition`, `TextDefinition`,
//!   `IntervalDefinition`, `OptionsDefinition`, `ArrayDefinition`) that is
//!   checked once at construction and then shared through `Arc`, and
//! - a *control* (`Boolean`, `Text`, `Interval`, `Options`, `Array`) holding
//!   one validated current value.
//!
//! Controls never change in place. `copy`, `toggle`, `increment`,
//! `append` and friends return a new control, or an error and leave the
//! original untouched.
//!
//! ```
//! use std::sync::Arc;
//!
//! use vibecontrols::{IntervalDefinition, IntervalInput, ProduceControl};
//!
//! let volume = Arc::new(IntervalDefinition::new(
//!     IntervalInput::new(0.0, 1.0, 0.5).with_grade(0.1),
//! )?);
//! let control = volume.produce_control(None)?;
//! let louder = control.increment()?;
//! assert_eq!(louder.current(), 0.6);
//! assert_eq!(control.current(), 0.5);
//! # Ok::<(), vibecontrols::ControlError>(())
//! ```

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod array;
mod boolean;
mod error;
mod interval;
mod options;
mod protocol;
mod text;
pub mod validation;

pub use array::{Array, ArrayDefinition, ArrayHints, ArrayInput, ArrayOrientation};
pub use boolean::{Boolean, BooleanDefinition, BooleanHints, BooleanInput, BooleanWidget};
pub use error::{
    BoundsConstraintViolation, ConstraintViolation, ControlError, ControlInvalidity,
    CycleOperationFailure, DefinitionInvalidity, GradeStep, IncrementOperationFailure,
    IndexOperation, IndexOutOfRange, InvalidPermutation, SelectionConstraintViolation,
    SizeConstraintViolation, StepConstraintViolation, TypeInvalidity,
    UniquenessConstraintViolation,
};
pub use interval::{
    Interval, IntervalDefinition, IntervalHints, IntervalInput, IntervalOrientation,
    IntervalWidget,
};
pub use options::{Options, OptionsDefinition, OptionsHints, OptionsInput, OptionsWidget};
pub use protocol::{Control, ControlDefinition, ProduceControl};
pub use text::{Text, TextDefinition, TextHints, TextInput, TextWidget};
pub use validation::Validator;
pub use vibecontrols_types::{Value, ValueKind};
