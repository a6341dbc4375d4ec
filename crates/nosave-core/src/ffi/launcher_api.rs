use super::*;

#[uniffi::export]
impl NoSaveCore {
    /// Open a chat with `phone_number` in the configured chat app.
    ///
    /// Returns true only when the chat app was launched. When it is not
    /// installed the store page is opened instead and this returns false.
    pub fn open_chat(&self, phone_number: String) -> bool {
        self.launcher.open_chat(&phone_number)
    }
}
