/// Blocking user-interaction seam (prompt / confirm / notice).
///
/// The wasm front end maps these onto `window.prompt`, `window.confirm` and
/// `window.alert`; tests script the replies.
pub trait UserPrompts {
    /// Free-text prompt. `None` means the user cancelled.
    fn prompt(&mut self, message: &str) -> Option<String>;
    fn confirm(&mut self, message: &str) -> bool;
    /// One-way informational notice.
    fn notify(&mut self, message: &str);
}
