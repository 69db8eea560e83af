//! Grayscale and depth-map preview images.

use depthcast_api::PreviewImages;
use dioxus::prelude::*;

/// Props for the [`DepthPreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DepthPreviewProps {
    /// Image URLs; `None` hides both containers.
    images: Option<PreviewImages>,
}

/// Side-by-side grayscale and depth-map previews served by the backend.
#[component]
pub fn DepthPreview(props: DepthPreviewProps) -> Element {
    let Some(images) = props.images else {
        return rsx! {};
    };

    rsx! {
        div { class: "grid grid-cols-1 sm:grid-cols-2 gap-4 mt-6",
            figure { id: "grayscalePreviewContainer",
                figcaption { class: "text-sm font-medium text-gray-700 mb-1", "Grayscale" }
                img {
                    id: "grayscalePreview",
                    src: "{images.grayscale_src}",
                    alt: "Grayscale preview",
                    class: "w-full rounded border border-gray-200",
                }
            }
            figure { id: "depthPreviewContainer",
                figcaption { class: "text-sm font-medium text-gray-700 mb-1", "Depth map" }
                img {
                    id: "depthPreview",
                    src: "{images.depth_src}",
                    alt: "Depth map preview",
                    class: "w-full rounded border border-gray-200",
                }
            }
        }
    }
}
