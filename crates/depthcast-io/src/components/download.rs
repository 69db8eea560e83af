//! Link to the exported model.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;

/// Props for the [`DownloadLink`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DownloadLinkProps {
    /// Absolute URL of the exported file; `None` hides the link.
    href: Option<String>,
}

/// Download link revealed after a successful export.
///
/// The backend serves the file as an attachment, so a plain link is
/// enough; no Blob round trip is needed.
#[component]
pub fn DownloadLink(props: DownloadLinkProps) -> Element {
    let Some(href) = props.href else {
        return rsx! {};
    };

    rsx! {
        a {
            id: "downloadLink",
            href: "{href}",
            download: "",
            class: "inline-flex items-center gap-2 mt-4 px-4 py-2 bg-green-600 hover:bg-green-700 rounded text-white font-medium transition-colors",
            Icon { icon: LdDownload, width: 16, height: 16 }
            "Download model"
        }
    }
}
