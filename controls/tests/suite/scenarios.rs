//! End-to-end behaviour of each control type

use std::sync::Arc;

use vibecontrols::{
    ArrayDefinition, ArrayInput, BooleanDefinition, BooleanInput, ConstraintViolation, Control,
    ControlDefinition, ControlError, IntervalDefinition, IntervalInput, InvalidPermutation,
    OptionsDefinition, OptionsInput, ProduceControl, Value,
};

use crate::common::{flags, init_tracing, list, percent_with_grade, text};

#[test]
fn boolean_toggle_from_default() {
    let definition = Arc::new(BooleanDefinition::default());
    let control = definition.produce_control(None).unwrap();
    assert!(control.toggle().current());
    assert!(!control.current());
}

#[test]
fn text_count_bounds() {
    let definition = text(Some(1), Some(5));
    assert_eq!(
        definition.validate_value(&Value::from("hello")).unwrap(),
        Value::from("hello")
    );
    for rejected in ["", "toolong!"] {
        let err = definition.validate_value(&Value::from(rejected)).unwrap_err();
        assert!(
            matches!(err.constraint(), Some(ConstraintViolation::Size(_))),
            "{rejected:?} gave {err:?}"
        );
    }
}

#[test]
fn interval_increments_until_bound() {
    init_tracing();
    let definition = percent_with_grade(0.1);
    let mut control = definition.produce_control(None).unwrap();
    assert_eq!(control.increment().unwrap().current(), 0.6);

    let mut failure = None;
    for _ in 0..10 {
        match control.increment() {
            Ok(next) => control = next,
            Err(error) => {
                failure = Some(error);
                break;
            }
        }
    }
    let error = failure.expect("stepping past maximum must fail");
    assert!(matches!(
        error.constraint(),
        Some(ConstraintViolation::Bounds(_))
    ));
    assert!((control.current() - 1.0).abs() < 1e-9);
}

#[test]
fn options_rejects_unknown_choice() {
    let definition = OptionsDefinition::new(OptionsInput::new(["a", "b", "c"], "a")).unwrap();
    let err = definition.validate_value(&Value::from("z")).unwrap_err();
    assert!(matches!(
        err.constraint(),
        Some(ConstraintViolation::Selection(_))
    ));
}

#[test]
fn array_of_booleans_grows_to_size_max() {
    init_tracing();
    let definition = Arc::new(
        ArrayDefinition::new(ArrayInput::new(BooleanDefinition::default()).with_size(1, Some(3)))
            .unwrap(),
    );
    let control = definition
        .produce_control(Some(list([true])))
        .unwrap()
        .append(Value::from(false))
        .unwrap()
        .append(Value::from(true))
        .unwrap();
    assert_eq!(control.current_value(), list([true, false, true]));

    let err = control.append(Value::from(false)).unwrap_err();
    assert!(matches!(err.constraint(), Some(ConstraintViolation::Size(_))));

    let err = definition.produce_control(None).unwrap_err();
    assert!(matches!(err.constraint(), Some(ConstraintViolation::Size(_))));
}

#[test]
fn array_reorder_applies_permutation() {
    let definition = Arc::new(flags(0, None).unwrap());
    let control = definition
        .produce_control(Some(list([true, false, false])))
        .unwrap();
    let reordered = control.reorder(&[2, 0, 1]).unwrap();
    assert_eq!(reordered.current_value(), list([false, true, false]));

    let err = control.reorder(&[0, 0, 1]).unwrap_err();
    assert_eq!(
        err,
        ControlError::Permutation(InvalidPermutation::DuplicateIndex { index: 0 })
    );
}

#[test]
fn failed_operations_leave_control_untouched() {
    let definition = text(Some(1), Some(3));
    let control = definition.produce_control(Some(Value::from("abc"))).unwrap();
    assert!(control.copy(Value::from("abcd")).is_err());
    assert!(control.clear().is_err());
    assert_eq!(control.current(), "abc");
}

#[test]
fn controls_share_definition_but_not_state() {
    let definition = percent_with_grade(0.25);
    let low = definition.produce_control(Some(Value::from(0.25))).unwrap();
    let high = definition.produce_control(Some(Value::from(1))).unwrap();
    assert!(Arc::ptr_eq(low.definition(), high.definition()));
    assert_eq!(low.current(), 0.25);
    assert_eq!(high.current(), 1.0);
    assert_eq!(Arc::strong_count(&definition), 3);
}

/// Serializes to JSON text, parses it back and re-validates.
fn assert_round_trips<C: Control>(control: &C) {
    let text = serde_json::to_string(&control.serialize()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let value = Value::try_from(json).unwrap();
    assert_eq!(
        control.definition().validate_value(&value).unwrap(),
        control.current_value(),
        "{text}"
    );
}

#[test]
fn serialized_values_round_trip() {
    let interval = percent_with_grade(0.5);
    assert_round_trips(&interval.produce_control(Some(Value::from(1))).unwrap());

    let boolean = Arc::new(BooleanDefinition::from(BooleanInput {
        default: true,
        ..BooleanInput::default()
    }));
    assert_round_trips(&boolean.produce_control(None).unwrap());
    assert_round_trips(&boolean.produce_control(None).unwrap().toggle());

    let name = text(None, Some(16));
    let quoted = name.produce_control(Some(Value::from("héllo \"w\""))).unwrap();
    assert_round_trips(&quoted);
    assert_round_trips(&name.produce_control(Some(Value::from(""))).unwrap());

    let single = Arc::new(OptionsDefinition::new(OptionsInput::new([1, 2, 3], 2)).unwrap());
    assert_round_trips(&single.produce_control(None).unwrap());

    let multi = Arc::new(
        OptionsDefinition::new(OptionsInput::new(["a", "b", "c"], vec!["c", "a"]).multiple())
            .unwrap(),
    );
    assert_round_trips(&multi.produce_control(None).unwrap());
    assert_round_trips(&multi.produce_control(Some(list(["b", "a"]))).unwrap());
}

#[test]
fn nested_array_round_trips_through_json_text() {
    let cell = IntervalDefinition::new(IntervalInput::new(0.0, 5.0, 0.0).with_grade(0.5)).unwrap();
    let row = ArrayDefinition::new(ArrayInput::new(cell)).unwrap();
    let grid = Arc::new(ArrayDefinition::new(ArrayInput::new(row).with_size(1, None)).unwrap());
    let rows = vec![list([1, 2]), list([2.5]), list(Vec::<f64>::new())];
    let control = grid.produce_control(Some(Value::List(rows))).unwrap();

    assert_eq!(
        serde_json::to_string(&control.serialize()).unwrap(),
        "[[1.0,2.0],[2.5],[]]"
    );
    assert_round_trips(&control);
}

#[test]
fn absent_differs_from_null() {
    let definition = Arc::new(BooleanDefinition::default());
    assert!(definition.produce_control(None).is_ok());
    assert!(definition.produce_control(Some(Value::Null)).is_err());
}
