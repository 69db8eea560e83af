//! Status message box.

use depthcast_api::{StatusMessage, StatusTone};
use dioxus::prelude::*;

/// Text colour class for a status tone.
const fn tone_class(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Info => "text-blue-600",
        StatusTone::Success => "text-green-600",
        StatusTone::Error => "text-red-600",
    }
}

/// Props for the [`StatusBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StatusBannerProps {
    /// Message to show; `None` renders nothing.
    status: Option<StatusMessage>,
}

/// One line of coloured status text.
#[component]
pub fn StatusBanner(props: StatusBannerProps) -> Element {
    let Some(status) = props.status else {
        return rsx! {};
    };
    let color = tone_class(status.tone);

    rsx! {
        div { id: "responseContainer", class: "mt-4",
            p { class: "{color} font-semibold", "{status.text}" }
        }
    }
}
