//! Native image file dialog through a detached `<input type="file">`.

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;
use webdevmonk_editor_core::{FilePicker, PickedFile};

pub const IMAGE_ACCEPT: &str = "image/*";

/// Opens the browser's file dialog restricted to `accept`.
#[derive(Debug, Clone)]
pub struct BrowserFilePicker {
    accept: String,
}

impl Default for BrowserFilePicker {
    fn default() -> Self {
        Self {
            accept: IMAGE_ACCEPT.to_string(),
        }
    }
}

impl BrowserFilePicker {
    pub fn new(accept: impl Into<String>) -> Self {
        Self {
            accept: accept.into(),
        }
    }

    fn create_input(&self) -> Option<HtmlInputElement> {
        let document = web_sys::window()?.document()?;
        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        input.set_type("file");
        input.set_accept(&self.accept);
        Some(input)
    }
}

impl FilePicker for BrowserFilePicker {
    async fn pick_image(&self) -> Option<PickedFile> {
        let input = self.create_input()?;

        // Resolves on `change` (file chosen) or `cancel` (dialog dismissed).
        // Browsers without `cancel` leave this pending; the editor then accepts
        // a new click and ignores whatever this dialog reports later.
        let mut listeners = Vec::with_capacity(2);
        let closed = js_sys::Promise::new(&mut |resolve, _reject| {
            for event in ["change", "cancel"] {
                let resolve = resolve.clone();
                listeners.push(EventListener::once(&input, event, move |_| {
                    let _ = resolve.call0(&JsValue::NULL);
                }));
            }
        });

        input.click();
        if let Err(e) = JsFuture::from(closed).await {
            tracing::debug!(target: "webdevmonk::browser", error = ?e, "file dialog failed");
            return None;
        }
        drop(listeners);

        let file = input.files()?.get(0)?;
        let buffer = match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => buffer,
            Err(e) => {
                tracing::warn!(target: "webdevmonk::browser", file = %file.name(), error = ?e, "reading picked file failed");
                return None;
            }
        };
        let data = js_sys::Uint8Array::new(&buffer).to_vec();

        tracing::debug!(
            target: "webdevmonk::browser",
            file = %file.name(),
            size = data.len(),
            "image picked"
        );
        Some(PickedFile::new(file.name(), Some(file.type_()), data))
    }
}
