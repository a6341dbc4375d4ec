use super::*;

#[uniffi::export]
impl NoSaveCore {
    /// Register a listener for screen-state changes.
    ///
    /// The callback fires once with the current state, then on every change.
    /// Only one listener is kept; registering again replaces the previous one.
    pub fn set_state_callback(&self, callback: Box<dyn StateCallback>) {
        let callback: Arc<dyn StateCallback> = Arc::from(callback);
        let mut rx = self.controller.subscribe();

        let listener = self.runtime.spawn(async move {
            loop {
                let state = ScreenStateInfo::from(&*rx.borrow_and_update());
                callback.on_state_changed(state);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });

        if let Some(previous) = self.state_listener.lock().replace(listener) {
            previous.abort();
        }
    }

    /// Stop delivering state changes.
    pub fn clear_state_callback(&self) {
        if let Some(listener) = self.state_listener.lock().take() {
            listener.abort();
        }
    }
}
