//! Cells for the sales tables: editable quantities, amounts with a trend
//! arrow, and achievement rates with a progress bar.

use maud::{Markup, html};

use crate::format::{calculate_achievement_rate, clamp_non_negative, format_number};

/// Whether an amount went up or down compared to the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// `true` for an increase, `false` for a decrease.
    pub is_increase: bool,
}

/// Browser events a [QuantityInput] reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The input lost focus while holding `value`.
    Blur(String),
    /// `key` was pressed while the input held `value`.
    KeyPress {
        /// The key name, e.g. `"Enter"`.
        key: String,
        /// The raw text of the input.
        value: String,
    },
}

type SaveCallback = Box<dyn FnMut(&str) + Send>;

/// A number input for a quantity.
///
/// Editable inputs pass their text to the save callback when they lose focus,
/// after a negative number has been replaced with `0`. Pressing Enter takes
/// the focus away, which saves.
pub struct QuantityInput {
    name: Option<String>,
    value: String,
    editable: bool,
    on_save: Option<SaveCallback>,
}

impl QuantityInput {
    /// An input showing `value`, or `0` if there is no value.
    pub fn new(value: Option<f64>, editable: bool) -> Self {
        let value = match value {
            Some(value) if value != 0.0 && !value.is_nan() => value.to_string(),
            _ => "0".to_owned(),
        };

        Self {
            name: None,
            value,
            editable,
            on_save: None,
        }
    }

    /// Set the input's `name` attribute.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Call `on_save` with the committed text whenever the input loses focus.
    pub fn on_save(mut self, on_save: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_save = Some(Box::new(on_save));
        self
    }

    /// The current text of the input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// React to a browser event. Returns `true` if the value was passed to the
    /// save callback.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        if !self.editable {
            return false;
        }

        match event {
            InputEvent::Blur(value) => self.commit(value),
            InputEvent::KeyPress { key, value } if key == "Enter" => {
                self.handle(InputEvent::Blur(value))
            }
            InputEvent::KeyPress { .. } => false,
        }
    }

    fn commit(&mut self, value: String) -> bool {
        self.value = clamp_non_negative(&value);

        match self.on_save.as_mut() {
            Some(on_save) => {
                on_save(&self.value);
                true
            }
            None => false,
        }
    }

    /// The `<input type="number">` element.
    pub fn render(&self) -> Markup {
        let class = if self.editable {
            "form-input editable"
        } else {
            "form-input readonly"
        };

        html! {
            input
                type="number"
                name=[self.name.as_deref()]
                value=(self.value)
                class=(class)
                disabled[!self.editable]
                min="0"
                step="1";
        }
    }
}

/// A table cell with `amount` formatted with digit grouping and, if
/// `comparison` is given, an up or down arrow.
pub fn amount_cell(amount: Option<f64>, comparison: Option<Comparison>) -> Markup {
    html! {
        td {
            (format_number(amount))
            @if let Some(comparison) = comparison {
                @if comparison.is_increase {
                    span class="comparison-arrow arrow-up" { " ↑" }
                } @else {
                    span class="comparison-arrow arrow-down" { " ↓" }
                }
            }
        }
    }
}

/// A table cell with the achievement rate of `actual` against `target` and a
/// progress bar filled up to at most 100%.
pub fn achievement_cell(actual: f64, target: f64) -> Markup {
    let rate = calculate_achievement_rate(actual, target);
    let fill = rate.min(100.0);

    html! {
        td {
            div class="achievement-rate" {
                span { (rate) "%" }
                div class="progress-bar" {
                    div class="progress-fill" style={"width: " (fill) "%"} {}
                }
            }
        }
    }
}

/// Wrap `inner` so that `content` is shown when it is hovered.
pub fn tooltip(content: &str, inner: Markup) -> Markup {
    html! {
        span class="tooltip" {
            (inner)
            div class="tooltip-content" { (content) }
        }
    }
}

#[cfg(test)]
mod quantity_input_tests {
    use std::sync::{Arc, Mutex};

    use crate::test_utils::{has_class, must_select, parse_markup};

    use super::{InputEvent, QuantityInput};

    fn recording_input(editable: bool) -> (QuantityInput, Arc<Mutex<Vec<String>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = saved.clone();
        let input = QuantityInput::new(Some(5.0), editable)
            .on_save(move |value| sink.lock().unwrap().push(value.to_owned()));

        (input, saved)
    }

    #[test]
    fn blur_saves_typed_value() {
        let (mut input, saved) = recording_input(true);

        assert!(input.handle(InputEvent::Blur("7".to_owned())));
        assert!(input.handle(InputEvent::Blur("12abc".to_owned())));

        assert_eq!(*saved.lock().unwrap(), ["7", "12abc"]);
        assert_eq!(input.value(), "12abc");
    }

    #[test]
    fn blur_clamps_negative_quantity_to_zero() {
        let (mut input, saved) = recording_input(true);

        assert!(input.handle(InputEvent::Blur("-3".to_owned())));

        assert_eq!(*saved.lock().unwrap(), ["0"]);
        assert_eq!(input.value(), "0");
        let html = parse_markup(input.render());
        assert_eq!(must_select(&html, "input").value().attr("value"), Some("0"));
    }

    #[test]
    fn blur_clamps_without_save_callback() {
        let mut input = QuantityInput::new(Some(5.0), true);

        assert!(!input.handle(InputEvent::Blur("-0.5".to_owned())));
        assert_eq!(input.value(), "0");
    }

    #[test]
    fn enter_blurs_and_saves() {
        let (mut input, saved) = recording_input(true);

        let committed = input.handle(InputEvent::KeyPress {
            key: "Enter".to_owned(),
            value: "8".to_owned(),
        });

        assert!(committed);
        assert_eq!(*saved.lock().unwrap(), ["8"]);
    }

    #[test]
    fn other_keys_do_not_save() {
        let (mut input, saved) = recording_input(true);

        let committed = input.handle(InputEvent::KeyPress {
            key: "a".to_owned(),
            value: "8".to_owned(),
        });

        assert!(!committed);
        assert!(saved.lock().unwrap().is_empty());
        assert_eq!(input.value(), "5");
    }

    #[test]
    fn read_only_input_never_saves() {
        let (mut input, saved) = recording_input(false);

        assert!(!input.handle(InputEvent::Blur("9".to_owned())));

        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_value_shows_zero() {
        assert_eq!(QuantityInput::new(None, true).value(), "0");
        assert_eq!(QuantityInput::new(Some(0.0), true).value(), "0");
        assert_eq!(QuantityInput::new(Some(2.5), true).value(), "2.5");
    }

    #[test]
    fn renders_editable_and_read_only_inputs() {
        let editable = parse_markup(QuantityInput::new(Some(3.0), true).with_name("qty").render());
        let read_only = parse_markup(QuantityInput::new(Some(3.0), false).render());

        let input = must_select(&editable, "input[type=number]");
        assert!(has_class(&input, "editable"));
        assert_eq!(input.value().attr("name"), Some("qty"));
        assert_eq!(input.value().attr("value"), Some("3"));
        assert_eq!(input.value().attr("min"), Some("0"));
        assert_eq!(input.value().attr("step"), Some("1"));
        assert_eq!(input.value().attr("disabled"), None);

        let input = must_select(&read_only, "input[type=number]");
        assert!(has_class(&input, "readonly"));
        assert!(input.value().attr("disabled").is_some());
    }
}
