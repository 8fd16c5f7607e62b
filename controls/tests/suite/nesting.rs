//! Arrays whose elements are other definitions, including arrays

use std::sync::Arc;

use vibecontrols::{
    ArrayDefinition, ArrayInput, ConstraintViolation, Control, ControlDefinition, ControlError,
    ControlInvalidity, IntervalDefinition, IntervalInput, OptionsDefinition, OptionsInput,
    ProduceControl, Value,
};

use crate::common::list;

fn matrix() -> Arc<ArrayDefinition> {
    let cell = IntervalDefinition::new(IntervalInput::new(0.0, 9.0, 0.0).with_grade(1.0)).unwrap();
    let row = ArrayDefinition::new(ArrayInput::new(cell).with_size(2, Some(2))).unwrap();
    Arc::new(ArrayDefinition::new(ArrayInput::new(row).with_size(1, None)).unwrap())
}

#[test]
fn nested_arrays_validate_every_level() {
    let definition = matrix();
    let control = definition
        .produce_control(Some(Value::List(vec![list([1, 2]), list([3, 4])])))
        .unwrap();
    assert_eq!(control.len(), 2);
    assert_eq!(
        control.serialize(),
        serde_json::json!([[1.0, 2.0], [3.0, 4.0]])
    );
}

#[test]
fn inner_errors_propagate_with_their_kind() {
    let definition = matrix();

    let err = definition
        .validate_value(&Value::List(vec![list([1, 2, 3])]))
        .unwrap_err();
    assert!(matches!(err.constraint(), Some(ConstraintViolation::Size(_))));

    let err = definition
        .validate_value(&Value::List(vec![list([1.5, 2.0])]))
        .unwrap_err();
    assert!(matches!(err.constraint(), Some(ConstraintViolation::Step(_))));

    let err = definition
        .validate_value(&Value::List(vec![list([1, 20])]))
        .unwrap_err();
    assert!(matches!(err.constraint(), Some(ConstraintViolation::Bounds(_))));

    let err = definition
        .validate_value(&Value::List(vec![list(["a", "b"])]))
        .unwrap_err();
    assert!(matches!(err, ControlInvalidity::Type(_)));
}

#[test]
fn appending_rows_revalidates_whole_matrix() {
    let control = matrix()
        .produce_control(Some(Value::List(vec![list([0, 0])])))
        .unwrap();
    let grown = control.append(list([5, 6])).unwrap();
    assert_eq!(grown.len(), 2);
    assert!(matches!(
        control.append(list([5])),
        Err(ControlError::Invalidity(ControlInvalidity::Constraint(
            ConstraintViolation::Size(_)
        )))
    ));
}

#[test]
fn array_of_multi_select_options() {
    let element = OptionsDefinition::new(
        OptionsInput::new(["bold", "italic", "underline"], vec!["bold"]).multiple(),
    )
    .unwrap();
    let definition = Arc::new(ArrayDefinition::new(ArrayInput::new(element).unique()).unwrap());
    let control = definition
        .produce_control(Some(Value::List(vec![list(["bold"]), list(["italic", "bold"])])))
        .unwrap();

    let err = control.append(list(["bold"])).unwrap_err();
    let Some(ConstraintViolation::Uniqueness(violation)) = err.constraint() else {
        panic!("expected uniqueness violation, got {err:?}");
    };
    assert_eq!(violation.index(), 2);

    let err = control.append(list(["bold", "bold"])).unwrap_err();
    assert!(matches!(
        err.constraint(),
        Some(ConstraintViolation::Uniqueness(_))
    ));
}

#[test]
fn element_kind_is_reported() {
    let definition = matrix();
    assert_eq!(definition.kind_name(), "array");
    assert_eq!(definition.element_definition().kind_name(), "array");
}
