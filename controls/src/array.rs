//! Variable-length sequences whose elements follow another definition.
//!
//! The element definition may be any control type, including another array,
//! so `Array` of `Array` of `Interval` is expressed by nesting definitions.
//! Every structural operation builds the candidate sequence and re-validates
//! it as a whole, so size and uniqueness rules hold after every change.

use std::mem;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use vibecontrols_types::{Value, ValueKind};

use crate::error::{
    ControlError, ControlInvalidity, DefinitionInvalidity, IndexOutOfRange, InvalidPermutation,
};
use crate::protocol::{Control, ControlDefinition, ProduceControl, resolve_narrowed};
use crate::validation::{
    ClassValidator, CompositeValidator, EachValidator, SizeValidator, UniquenessValidator,
    Validator,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayOrientation {
    Horizontal,
    #[default]
    Vertical,
    Grid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayHints {
    pub orientation: ArrayOrientation,
    pub collapsible: bool,
    pub initially_collapsed: bool,
    pub border: bool,
    pub title: Option<String>,
    pub label: Option<String>,
    pub help_text: Option<String>,
}

/// Parameters for an [`ArrayDefinition`].
#[derive(Debug, Clone)]
pub struct ArrayInput {
    pub element_definition: Arc<dyn ControlDefinition>,
    pub size_min: usize,
    pub size_max: Option<usize>,
    pub default_elements: Vec<Value>,
    pub allow_duplicates: bool,
    pub optional: bool,
    pub hints: ArrayHints,
}

impl ArrayInput {
    #[must_use]
    pub fn new(element_definition: impl ControlDefinition + 'static) -> Self {
        Self::shared(Arc::new(element_definition))
    }

    /// Uses an element definition that is also held elsewhere.
    #[must_use]
    pub fn shared(element_definition: Arc<dyn ControlDefinition>) -> Self {
        Self {
            element_definition,
            size_min: 0,
            size_max: None,
            default_elements: Vec::new(),
            allow_duplicates: true,
            optional: false,
            hints: ArrayHints::default(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size_min: usize, size_max: Option<usize>) -> Self {
        self.size_min = size_min;
        self.size_max = size_max;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, elements: impl IntoIterator<Item = Value>) -> Self {
        self.default_elements = elements.into_iter().collect();
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.allow_duplicates = false;
        self
    }
}

#[derive(Debug)]
pub struct ArrayDefinition {
    element_definition: Arc<dyn ControlDefinition>,
    size_min: usize,
    size_max: Option<usize>,
    default_elements: Vec<Value>,
    allow_duplicates: bool,
    optional: bool,
    hints: ArrayHints,
    validator: CompositeValidator,
}

impl ArrayDefinition {
    pub fn new(input: ArrayInput) -> Result<Self, DefinitionInvalidity> {
        Self::build(input).inspect_err(|error| tracing::debug!(%error, "rejected array definition"))
    }

    fn build(input: ArrayInput) -> Result<Self, DefinitionInvalidity> {
        if let Some(size_max) = input.size_max
            && input.size_min > size_max
        {
            return Err(DefinitionInvalidity::new("size_min", "cannot exceed size_max")
                .with_detail(format!("{} > {size_max}", input.size_min)));
        }

        let size_min = (input.size_min > 0).then_some(input.size_min);
        let element = Arc::clone(&input.element_definition);
        let mut validator =
            CompositeValidator::new().with(ClassValidator::new(ValueKind::List));
        if size_min.is_some() || input.size_max.is_some() {
            validator = validator
                .with(SizeValidator::new(size_min, input.size_max).with_label("Array size"));
        }
        validator = validator.with(EachValidator::new(
            move |value: Value| -> Result<Value, ControlInvalidity> {
                element.validate_value(&value)
            },
        ));
        if !input.allow_duplicates {
            validator = validator.with(UniquenessValidator);
        }

        // An empty default is not checked here; `produce_control(None)` then
        // fails when `size_min > 0`.
        let default_elements = if input.default_elements.is_empty() {
            Vec::new()
        } else {
            validator
                .validate(Value::List(input.default_elements))
                .map_err(|error| DefinitionInvalidity::rejected_default("default_elements", &error))?
                .into_list()
                .map_err(|other| {
                    DefinitionInvalidity::new("default_elements", "must be a list")
                        .with_detail(other.kind().to_string())
                })?
        };

        Ok(Self {
            element_definition: input.element_definition,
            size_min: input.size_min,
            size_max: input.size_max,
            default_elements,
            allow_duplicates: input.allow_duplicates,
            optional: input.optional,
            hints: input.hints,
            validator,
        })
    }

    #[must_use]
    pub fn element_definition(&self) -> &Arc<dyn ControlDefinition> {
        &self.element_definition
    }

    #[must_use]
    pub const fn size_min(&self) -> usize {
        self.size_min
    }

    #[must_use]
    pub const fn size_max(&self) -> Option<usize> {
        self.size_max
    }

    #[must_use]
    pub fn default_elements(&self) -> &[Value] {
        &self.default_elements
    }

    #[must_use]
    pub const fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    #[must_use]
    pub fn hints(&self) -> &ArrayHints {
        &self.hints
    }
}

impl ControlDefinition for ArrayDefinition {
    fn kind_name(&self) -> &'static str {
        "array"
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn validate_value(&self, value: &Value) -> Result<Value, ControlInvalidity> {
        self.validator.validate(value.clone())
    }

    /// The default elements. An empty default is not checked at construction,
    /// so with `size_min > 0` this value fails `validate_value`.
    fn produce_default(&self) -> Value {
        Value::List(self.default_elements.clone())
    }

    fn serialize_value(&self, value: &Value) -> JsonValue {
        match value {
            Value::List(elements) => JsonValue::Array(
                elements
                    .iter()
                    .map(|element| self.element_definition.serialize_value(element))
                    .collect(),
            ),
            other => other.to_json(),
        }
    }
}

impl ProduceControl for ArrayDefinition {
    type Control = Array;

    fn produce_control(self: &Arc<Self>, initial: Option<Value>) -> Result<Array, ControlError> {
        let elements = resolve_narrowed(&**self, initial, "list", Value::into_list)?;
        Ok(Array {
            definition: Arc::clone(self),
            elements,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Array {
    definition: Arc<ArrayDefinition>,
    elements: Vec<Value>,
}

impl Array {
    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn append(&self, element: Value) -> Result<Self, ControlError> {
        let mut elements = self.elements.clone();
        elements.push(element);
        tracing::trace!(operation = "append", length = elements.len(), "array change");
        self.copy(Value::List(elements))
    }

    pub fn remove_at(&self, index: usize) -> Result<Self, ControlError> {
        if index >= self.elements.len() {
            return Err(IndexOutOfRange::access(index, self.elements.len()).into());
        }
        let mut elements = self.elements.clone();
        elements.remove(index);
        tracing::trace!(operation = "remove", index, length = elements.len(), "array change");
        self.copy(Value::List(elements))
    }

    /// Inserts before `index`; `index == len()` appends.
    pub fn insert_at(&self, index: usize, element: Value) -> Result<Self, ControlError> {
        if index > self.elements.len() {
            return Err(IndexOutOfRange::insertion(index, self.elements.len()).into());
        }
        let mut elements = self.elements.clone();
        elements.insert(index, element);
        tracing::trace!(operation = "insert", index, length = elements.len(), "array change");
        self.copy(Value::List(elements))
    }

    /// Rearranges elements so that position `i` holds the old element at
    /// `new_order[i]`. `new_order` must be a permutation of `0..len()`.
    pub fn reorder(&self, new_order: &[usize]) -> Result<Self, ControlError> {
        let length = self.elements.len();
        if new_order.len() != length {
            return Err(InvalidPermutation::WrongLength {
                expected: length,
                actual: new_order.len(),
            }
            .into());
        }
        let mut seen = vec![false; length];
        let mut elements = Vec::with_capacity(length);
        for &index in new_order {
            let Some(element) = self.elements.get(index) else {
                return Err(InvalidPermutation::OutOfRange { index, length }.into());
            };
            if mem::replace(&mut seen[index], true) {
                return Err(InvalidPermutation::DuplicateIndex { index }.into());
            }
            elements.push(element.clone());
        }
        tracing::trace!(operation = "reorder", length, "array change");
        self.copy(Value::List(elements))
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition) && self.elements == other.elements
    }
}

impl Control for Array {
    type Definition = ArrayDefinition;

    fn definition(&self) -> &Arc<ArrayDefinition> {
        &self.definition
    }

    fn current_value(&self) -> Value {
        Value::List(self.elements.clone())
    }

    fn copy(&self, value: Value) -> Result<Self, ControlError> {
        self.definition.produce_control(Some(value))
    }
}
