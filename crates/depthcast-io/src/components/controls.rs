//! Labeled form controls shared by the export form.

use dioxus::prelude::*;

/// Static description of a range slider.
pub struct Slider<'a> {
    /// Element id, also used as the form field name.
    pub id: &'a str,
    /// Visible label.
    pub label: &'a str,
    /// Help text under the label; empty hides it.
    pub description: &'a str,
    /// Smallest selectable value.
    pub min: f64,
    /// Largest selectable value.
    pub max: f64,
    /// Slider increment.
    pub step: f64,
    /// Decimal places in the value readout.
    pub decimals: usize,
    /// Unit suffix for the readout, e.g. `" mm"`.
    pub unit: &'a str,
}

/// Render a labeled range slider with a live value readout.
pub fn render_slider(slider: &Slider<'_>, value: f64, on_input: impl Fn(f64) + 'static) -> Element {
    let decimals = slider.decimals;
    let display = format!("{value:.decimals$}{}", slider.unit);
    let id = slider.id.to_string();
    let label = slider.label.to_string();
    let description = slider.description.to_string();
    let (min, max, step) = (slider.min, slider.max, slider.step);

    rsx! {
        div { class: "flex flex-col gap-1",
            div { class: "flex justify-between text-sm",
                label { r#for: "{id}",
                    class: "text-gray-800 font-medium",
                    "{label}"
                }
                span { class: "text-gray-500 tabular-nums",
                    "{display}"
                }
            }
            if !description.is_empty() {
                p { class: "text-xs text-gray-500", "{description}" }
            }
            input {
                r#type: "range",
                id: "{id}",
                name: "{id}",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                class: "w-full accent-indigo-600",
                oninput: move |e| {
                    match e.value().parse::<f64>() {
                        Ok(v) => on_input(v),
                        Err(err) => {
                            web_sys::console::warn_1(
                                &format!("slider parse failure: {err:?} from {:?}", e.value())
                                    .into(),
                            );
                        }
                    }
                },
            }
        }
    }
}

/// Render a labeled `<select>` from `(value, display)` pairs.
pub fn render_select(
    id: &str,
    label: &str,
    options: &[(&str, &str)],
    selected: &str,
    on_change: impl Fn(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let options: Vec<(String, String)> = options
        .iter()
        .map(|(v, l)| ((*v).to_string(), (*l).to_string()))
        .collect();
    let selected = selected.to_string();

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{id}",
                class: "text-sm text-gray-800 font-medium",
                "{label}"
            }
            select {
                id: "{id}",
                class: "px-2 py-1 rounded border border-gray-300 bg-white text-gray-900 text-sm",
                value: "{selected}",
                onchange: move |e| {
                    on_change(e.value());
                },

                for (value, display) in options.iter() {
                    option {
                        value: "{value}",
                        selected: value == &selected,
                        "{display}"
                    }
                }
            }
        }
    }
}
