use controller::UserPrompts;

/// [`UserPrompts`] backed by the browser's blocking dialogs.
#[derive(Debug, Default)]
pub struct WindowPrompts;

impl UserPrompts for WindowPrompts {
    fn prompt(&mut self, message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok()?
    }

    fn confirm(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|win| win.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn notify(&mut self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}
