use depthcast_api::{
    ApiBase, BackgroundColor, DEFAULT_API_BASE, ExportFormat, ExportParams, FormController,
    PreviewController, SelectedFile, ViewState,
};
use depthcast_io::{DepthPreview, DownloadLink, ExportForm, FileUpload, StatusBanner, http};
use dioxus::prelude::*;

/// Backend base URL, fixed at build time.
fn api_base() -> ApiBase {
    ApiBase::new(option_env!("DEPTHCAST_API_BASE").unwrap_or(DEFAULT_API_BASE))
}

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Holds the page state in Dioxus signals and wires the upload and
/// export components to the preview and form controllers. Each
/// controller call that yields a request spawns one fetch whose
/// outcome is fed back into the shared [`ViewState`].
fn app() -> Element {
    // --- Application state ---
    let mut view = use_signal(ViewState::default);
    let mut file = use_signal(|| Option::<SelectedFile>::None);
    let mut format = use_signal(ExportFormat::default);
    let mut background = use_signal(BackgroundColor::default);
    let mut params = use_signal(ExportParams::default);

    let preview_ctl = use_hook(|| PreviewController::new(api_base()));
    let form_ctl = use_hook(|| FormController::new(api_base()));

    // --- File selection: request a preview ---
    let on_select = move |selected: Option<SelectedFile>| {
        let request =
            preview_ctl.file_selected(&mut view.write(), selected.as_ref(), background());
        file.set(selected);

        if let Some(request) = request {
            let ctl = preview_ctl.clone();
            spawn(async move {
                let outcome = http::send(&request).await;
                ctl.finish(&mut view.write(), outcome);
            });
        }
    };

    // --- Form submission: request an export ---
    let on_submit = move |()| {
        let request = form_ctl.submit(
            &mut view.write(),
            file.read().as_ref(),
            format(),
            &params(),
        );

        if let Some(request) = request {
            let ctl = form_ctl.clone();
            spawn(async move {
                let outcome = http::send(&request).await;
                ctl.finish(&mut view.write(), outcome);
            });
        }
    };

    let state = view();

    // --- Layout ---
    rsx! {
        // Tailwind CSS utilities from the Play CDN; the page has no build step.
        script { src: "https://cdn.tailwindcss.com" }

        div { class: "min-h-screen bg-gray-50 text-gray-900 flex flex-col items-center",
            header { class: "w-full max-w-3xl px-6 py-6",
                h1 { class: "text-2xl font-bold", "depthcast" }
                p { class: "text-gray-500 text-sm",
                    "Turn a photo into a depth-map relief for laser-etched crystals"
                }
            }

            main { class: "w-full max-w-3xl px-6 pb-10",
                div { class: "bg-white rounded-lg shadow p-6",
                    ExportForm {
                        format: format(),
                        background: background(),
                        params: params(),
                        submit_label: state.submit_label(),
                        submit_disabled: state.submit_disabled(),
                        on_format: move |f| format.set(f),
                        on_background: move |b| background.set(b),
                        on_params: move |p| params.set(p),
                        on_submit: on_submit,

                        FileUpload { on_select: on_select }
                    }

                    StatusBanner { status: state.status.clone() }
                    DownloadLink { href: state.download_href.clone() }
                }

                DepthPreview { images: state.previews.clone() }
            }
        }
    }
}
