//! Image file picker.

use depthcast_api::SelectedFile;
use dioxus::html::FileData;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called after every change of the input: `Some` with the file
    /// contents, or `None` when the selection was cleared.
    on_select: EventHandler<Option<SelectedFile>>,
}

/// A file picker for the source photo.
///
/// Offers PNG, JPEG, BMP, and WebP images. Every change fires
/// `on_select` exactly once: with the file contents, or with `None`
/// when the selection is empty or the file cannot be read.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut error = use_signal(|| Option::<String>::None);

    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            props.on_select.call(None);
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => {
                error.set(None);
                props
                    .on_select
                    .call(Some(SelectedFile::from_picker(file.name(), bytes.to_vec())));
            }
            Err(e) => {
                error.set(Some(format!("Failed to read file: {e}")));
                props.on_select.call(None);
            }
        }
    };

    rsx! {
        div { class: "flex flex-col gap-2",
            label { r#for: "fileInput",
                class: "flex items-center gap-2 text-sm text-gray-800 font-medium",
                Icon { icon: LdUpload, width: 16, height: 16 }
                "Image"
            }
            input {
                r#type: "file",
                id: "fileInput",
                name: "file",
                accept: ".png,.jpg,.jpeg,.bmp,.webp",
                class: "block w-full text-sm text-gray-700 file:mr-3 file:px-4 file:py-2 file:rounded file:border-0 file:bg-indigo-600 file:text-white hover:file:bg-indigo-700",
                onchange: move |evt: FormEvent| async move {
                    process_files(evt.files()).await;
                },
            }
            if let Some(ref err) = error() {
                p { class: "text-red-600 text-sm", "{err}" }
            }
        }
    }
}
