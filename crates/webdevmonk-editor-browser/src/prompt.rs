use webdevmonk_editor_core::UrlPrompt;

/// `window.prompt()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

impl UrlPrompt for BrowserPrompt {
    fn prompt(&self, message: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message(message) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(target: "webdevmonk::browser", error = ?e, "prompt failed");
                None
            }
        }
    }
}
