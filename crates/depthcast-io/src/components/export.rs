//! Export form: format, background and relief parameters.

use depthcast_api::{BackgroundColor, ExportFormat, ExportParams};
use dioxus::prelude::*;

use super::controls::{Slider, render_select, render_slider};

const DEPTH_INTENSITY: Slider<'static> = Slider {
    id: "depthIntensity",
    label: "Depth intensity",
    description: "Height of the tallest point above the base.",
    min: *ExportParams::DEPTH_INTENSITY_RANGE.start(),
    max: *ExportParams::DEPTH_INTENSITY_RANGE.end(),
    step: 0.1,
    decimals: 1,
    unit: " mm",
};

const BG_THRESHOLD: Slider<'static> = Slider {
    id: "bgThreshold",
    label: "Background threshold",
    description: "Pixels brighter than this are flattened to the base.",
    min: 0.0,
    max: 255.0,
    step: 1.0,
    decimals: 0,
    unit: "",
};

const CRYSTAL_SIZE: Slider<'static> = Slider {
    id: "crystalSize",
    label: "Crystal size",
    description: "Edge length of the model footprint.",
    min: *ExportParams::CRYSTAL_SIZE_RANGE.start(),
    max: *ExportParams::CRYSTAL_SIZE_RANGE.end(),
    step: 1.0,
    decimals: 0,
    unit: " mm",
};

/// Props for the [`ExportForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ExportFormProps {
    /// Selected output format.
    format: ExportFormat,
    /// Background used for the preview.
    background: BackgroundColor,
    /// Relief parameters.
    params: ExportParams,
    /// Submit button text.
    submit_label: &'static str,
    /// Whether the submit button is disabled.
    submit_disabled: bool,
    /// Called when the format select changes.
    on_format: EventHandler<ExportFormat>,
    /// Called when the background select changes.
    on_background: EventHandler<BackgroundColor>,
    /// Called when any slider moves.
    on_params: EventHandler<ExportParams>,
    /// Called when the form is submitted.
    on_submit: EventHandler<()>,
    /// Rendered above the controls (the file picker).
    children: Element,
}

/// The upload form with every export option and the submit button.
#[component]
pub fn ExportForm(props: ExportFormProps) -> Element {
    let params = props.params;
    let on_params = props.on_params;
    let on_format = props.on_format;
    let on_background = props.on_background;

    let formats: Vec<(&str, &str)> = ExportFormat::ALL
        .iter()
        .map(|f| (f.as_str(), f.label()))
        .collect();
    let backgrounds: Vec<(&str, &str)> = BackgroundColor::ALL
        .iter()
        .map(|b| (b.as_str(), b.label()))
        .collect();

    let button_class = if props.submit_disabled {
        "w-full px-4 py-2 bg-gray-300 rounded text-gray-500 cursor-not-allowed"
    } else {
        "w-full px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded text-white font-medium transition-colors cursor-pointer"
    };

    rsx! {
        form {
            id: "uploadForm",
            class: "space-y-4",
            onsubmit: move |evt| {
                evt.prevent_default();
                props.on_submit.call(());
            },

            {props.children}

            div { class: "grid grid-cols-2 gap-4",
                {render_select(
                    "formatSelect",
                    "Format",
                    &formats,
                    props.format.as_str(),
                    move |v| match v.parse::<ExportFormat>() {
                        Ok(f) => on_format.call(f),
                        Err(e) => web_sys::console::warn_1(&e.to_string().into()),
                    },
                )}
                {render_select(
                    "bgSelect",
                    "Preview background",
                    &backgrounds,
                    props.background.as_str(),
                    move |v| match v.parse::<BackgroundColor>() {
                        Ok(b) => on_background.call(b),
                        Err(e) => web_sys::console::warn_1(&e.to_string().into()),
                    },
                )}
            }

            {render_slider(
                &DEPTH_INTENSITY,
                f64::from(params.depth_intensity),
                move |v| {
                    #[allow(clippy::cast_possible_truncation)]
                    let depth_intensity = v as f32;
                    on_params.call(ExportParams { depth_intensity, ..params });
                },
            )}
            {render_slider(
                &BG_THRESHOLD,
                f64::from(params.bg_threshold),
                move |v| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let bg_threshold = v.round().clamp(0.0, 255.0) as u8;
                    on_params.call(ExportParams { bg_threshold, ..params });
                },
            )}
            {render_slider(
                &CRYSTAL_SIZE,
                f64::from(params.crystal_size),
                move |v| {
                    #[allow(clippy::cast_possible_truncation)]
                    let crystal_size = v as f32;
                    on_params.call(ExportParams { crystal_size, ..params });
                },
            )}

            button {
                r#type: "submit",
                class: "{button_class}",
                disabled: props.submit_disabled,
                "{props.submit_label}"
            }
        }
    }
}
