//! Property-based checks for array sizing, permutations and interval grids

use std::sync::Arc;

use proptest::collection;
use proptest::prelude::*;
use vibecontrols::{
    ArrayDefinition, ArrayInput, ConstraintViolation, Control, ControlDefinition,
    IntervalDefinition, IntervalInput, ProduceControl, TextDefinition, TextInput, Value,
};

use crate::common::flags;

#[derive(Debug, Clone)]
enum Edit {
    Append(bool),
    Remove(usize),
    Insert(usize, bool),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        any::<bool>().prop_map(Edit::Append),
        (0usize..6).prop_map(Edit::Remove),
        (0usize..6, any::<bool>()).prop_map(|(index, flag)| Edit::Insert(index, flag)),
    ]
}

fn grade() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.1), Just(0.25), Just(0.5), Just(1.0), Just(2.5)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn array_size_stays_within_bounds(edits in collection::vec(edit(), 0..40)) {
        let definition = Arc::new(flags(1, Some(4)).unwrap());
        let mut control = definition.produce_control(Some(Value::List(vec![Value::from(true)]))).unwrap();
        for edit in edits {
            let before = control.clone();
            let result = match edit {
                Edit::Append(flag) => control.append(Value::from(flag)),
                Edit::Remove(index) => control.remove_at(index),
                Edit::Insert(index, flag) => control.insert_at(index, Value::from(flag)),
            };
            prop_assert_eq!(&control, &before);
            if let Ok(next) = result {
                control = next;
            }
            prop_assert!((1..=4).contains(&control.len()));
        }
    }

    #[test]
    fn reorder_by_permutation_is_reversible(
        (words, order) in (1usize..8).prop_flat_map(|length| {
            (
                collection::vec("[a-z]{1,6}", length),
                Just((0..length).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
    ) {
        let element = TextDefinition::new(TextInput::default()).unwrap();
        let definition = Arc::new(ArrayDefinition::new(ArrayInput::new(element)).unwrap());
        let control = definition
            .produce_control(Some(words.iter().map(String::as_str).collect()))
            .unwrap();

        let reordered = control.reorder(&order).unwrap();
        for (position, &source) in order.iter().enumerate() {
            prop_assert_eq!(reordered.get(position), control.get(source));
        }

        let mut inverse = vec![0; order.len()];
        for (position, &source) in order.iter().enumerate() {
            inverse[source] = position;
        }
        prop_assert_eq!(reordered.reorder(&inverse).unwrap(), control);
    }

    #[test]
    fn grid_points_are_accepted(minimum in -20i32..20, grade in grade(), steps in 0u32..=40) {
        let minimum = f64::from(minimum);
        let maximum = minimum + 40.0 * grade;
        let definition = IntervalDefinition::new(
            IntervalInput::new(minimum, maximum, minimum).with_grade(grade),
        )
        .unwrap();
        let point = minimum + f64::from(steps) * grade;
        prop_assert!(definition.validate_value(&Value::from(point)).is_ok());
    }

    #[test]
    fn off_grid_points_are_step_violations(minimum in -20i32..20, grade in grade(), steps in 0u32..40) {
        let minimum = f64::from(minimum);
        let maximum = minimum + 40.0 * grade;
        let definition = IntervalDefinition::new(
            IntervalInput::new(minimum, maximum, minimum).with_grade(grade),
        )
        .unwrap();
        let point = minimum + (f64::from(steps) + 0.5) * grade;
        let err = definition.validate_value(&Value::from(point)).unwrap_err();
        prop_assert!(matches!(err.constraint(), Some(ConstraintViolation::Step(_))));
    }

    #[test]
    fn stepping_keeps_values_on_grid(grade in grade(), moves in collection::vec(any::<bool>(), 0..60)) {
        let definition = Arc::new(
            IntervalDefinition::new(IntervalInput::new(0.0, 10.0, 5.0).with_grade(grade)).unwrap(),
        );
        let mut control = definition.produce_control(None).unwrap();
        for up in moves {
            let result = if up { control.increment() } else { control.decrement() };
            if let Ok(next) = result {
                control = next;
            }
            prop_assert!(definition.validate_value(&control.current_value()).is_ok());
        }
    }
}
