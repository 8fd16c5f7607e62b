//! Definitions loaded from TOML and JSON descriptors

use std::sync::Arc;

use serde::Deserialize;
use vibecontrols::{
    ArrayHints, ArrayOrientation, BooleanDefinition, BooleanWidget, Control, ControlDefinition,
    IntervalDefinition, IntervalOrientation, IntervalWidget, OptionsDefinition, ProduceControl,
    TextDefinition, TextWidget, Value,
};

#[derive(Deserialize)]
struct Form {
    enabled: BooleanDefinition,
    name: TextDefinition,
    volume: IntervalDefinition,
    theme: OptionsDefinition,
}

const FORM: &str = r#"
[enabled]
default = true
hints = { widget_preference = "toggle", label = "Enabled" }

[name]
default = "untitled"
count_min = 1
count_max = 32
hints = { widget_preference = "input", placeholder = "Name" }

[volume]
minimum = 0.0
maximum = 1.0
default = 0.5
grade = 0.1
hints = { widget_preference = "slider", orientation = "horizontal", show_ticks = true }

[theme]
choices = ["light", "dark", "system"]
default = "system"
hints = { widget_preference = "dropdown" }
"#;

#[test]
fn toml_form_builds_working_definitions() {
    let form: Form = toml::from_str(FORM).unwrap();

    assert_eq!(
        form.enabled.hints().widget_preference,
        Some(BooleanWidget::Toggle)
    );
    assert_eq!(form.name.hints().widget_preference, Some(TextWidget::Input));
    assert_eq!(form.name.hints().placeholder.as_deref(), Some("Name"));
    let volume_hints = form.volume.hints();
    assert_eq!(volume_hints.widget_preference, Some(IntervalWidget::Slider));
    assert_eq!(volume_hints.orientation, Some(IntervalOrientation::Horizontal));
    assert!(volume_hints.show_ticks);
    assert!(volume_hints.show_value);

    let volume = Arc::new(form.volume).produce_control(None).unwrap();
    assert_eq!(volume.increment().unwrap().current(), 0.6);

    let theme = Arc::new(form.theme).produce_control(None).unwrap();
    assert_eq!(theme.cycle_next().unwrap().current(), &Value::from("light"));

    let name = Arc::new(form.name);
    assert!(name.produce_control(Some(Value::from(""))).is_err());
    assert_eq!(
        name.produce_control(None).unwrap().serialize(),
        serde_json::json!("untitled")
    );
}

#[test]
fn inconsistent_descriptor_is_rejected_at_the_boundary() {
    let err = toml::from_str::<IntervalDefinition>(
        "minimum = 0.0\nmaximum = 1.0\ndefault = 0.55\ngrade = 0.1\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("Parameter 'default' is invalid"));

    let err = serde_json::from_str::<OptionsDefinition>(
        r#"{"choices": ["a", "a"], "default": "a"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("must be unique"));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<BooleanDefinition>(r#"{"defualt": true}"#).is_err());
    assert!(serde_json::from_str::<TextDefinition>(r#"{"hints": {"colour": "red"}}"#).is_err());
}

#[test]
fn multi_select_descriptor() {
    let definition: OptionsDefinition = serde_json::from_str(
        r#"{"choices": [1, 2, 3], "default": [1, 3], "allow_multiple": true}"#,
    )
    .unwrap();
    assert!(definition.allow_multiple());
    assert_eq!(
        definition.produce_default(),
        Value::from(vec![Value::from(1), Value::from(3)])
    );
}

#[test]
fn optional_flag_does_not_affect_validation() {
    let definition: TextDefinition =
        serde_json::from_str(r#"{"optional": true, "count_min": 2, "default": "ok"}"#).unwrap();
    assert!(definition.is_optional());
    assert!(definition.validate_value(&Value::from("x")).is_err());
}

#[test]
fn array_hints_serialize_lowercase() {
    let hints = ArrayHints {
        orientation: ArrayOrientation::Grid,
        title: Some("Points".into()),
        ..Default::default()
    };
    let json = serde_json::to_value(&hints).unwrap();
    assert_eq!(json["orientation"], "grid");
    assert_eq!(json["title"], "Points");
    assert_eq!(json["collapsible"], false);
}
