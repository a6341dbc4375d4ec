use std::sync::Arc;

use nosave_core::launcher::{ContactActionLauncher, LaunchOutcome, LaunchPlatform, Notice};
use nosave_core::presentation::ScreenState;
use nosave_core::{CallLogController, CallRecord, ControllerState, StartAction};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::debug;

use crate::ui::notifications::{Notification, NotificationQueue};

pub type Launcher = ContactActionLauncher<Arc<dyn LaunchPlatform>>;

/// Result of a chat launch run off the event loop
#[derive(Debug)]
pub struct ChatLaunch {
    pub label: String,
    pub outcome: LaunchOutcome,
}

pub struct App {
    pub running: bool,
    controller: CallLogController,
    launcher: Arc<Launcher>,
    launch_tx: UnboundedSender<ChatLaunch>,
    launch_rx: Option<UnboundedReceiver<ChatLaunch>>,
    /// Last state published by the controller
    state: ControllerState,
    selected_index: usize,
    /// First visible card; kept by the list view so the selection stays on screen
    pub scroll_offset: usize,
    /// The "allow access to call history?" modal is open
    pub permission_prompt: bool,
    notifications: NotificationQueue,
    /// Frame counter for the loading spinner
    pub frame_counter: u64,
}

impl App {
    pub fn new(controller: CallLogController, launcher: Launcher) -> Self {
        let state = controller.state();
        let (launch_tx, launch_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            controller,
            launcher: Arc::new(launcher),
            launch_tx,
            launch_rx: Some(launch_rx),
            state,
            selected_index: 0,
            scroll_offset: 0,
            permission_prompt: false,
            notifications: NotificationQueue::new(),
            frame_counter: 0,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.controller.subscribe()
    }

    /// Completed chat launches; can only be taken once.
    pub fn take_launch_rx(&mut self) -> Option<UnboundedReceiver<ChatLaunch>> {
        self.launch_rx.take()
    }

    pub fn screen(&self) -> ScreenState<'_> {
        ScreenState::from_state(&self.state)
    }

    pub fn chat_app_name(&self) -> &str {
        &self.launcher.app().display_name
    }

    /// First display: either a load starts or the access prompt opens.
    pub fn start(&mut self) {
        if self.controller.start() == StartAction::RequestPermission {
            self.permission_prompt = true;
        }
    }

    pub fn answer_permission(&mut self, granted: bool) {
        self.permission_prompt = false;
        self.controller.on_permission_result(granted);
    }

    pub fn reload(&mut self) {
        if self.controller.load().is_some() {
            self.notify(Notification::info("Refreshing call history"));
        } else {
            self.notify(Notification::warning("Call history access not granted"));
        }
    }

    /// The terminal regained focus.
    pub fn on_foreground(&mut self) {
        debug!("terminal focus gained");
        self.controller.on_foreground();
    }

    /// Take a new controller snapshot, keeping the selection in range.
    pub fn sync_state(&mut self, state: ControllerState) {
        self.state = state;
        let count = self.records().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
    }

    pub fn records(&self) -> &[CallRecord] {
        match self.screen() {
            ScreenState::Records(records) => records,
            _ => &[],
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_record(&self) -> Option<&CallRecord> {
        self.records().get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.records().len() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.records().len().saturating_sub(1);
    }

    /// Open a chat with the selected call's number.
    ///
    /// The launcher may wait on the system URL handler, so it runs on a
    /// blocking worker and reports back through [`App::on_chat_launched`].
    pub fn open_selected_chat(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let number = record.number().to_string();
        let label = record.display_name().to_string();
        if number.is_empty() {
            self.notify(Notification::warning("No number for this call"));
            return;
        }

        let launcher = self.launcher.clone();
        let launch_tx = self.launch_tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = launcher.open_chat_outcome(&number);
            let _ = launch_tx.send(ChatLaunch { label, outcome });
        });
    }

    pub fn on_chat_launched(&mut self, launch: ChatLaunch) {
        debug!(outcome = ?launch.outcome, "chat launch finished");
        // Failures already reach the user as launcher notices
        if launch.outcome == LaunchOutcome::Launched {
            self.notify(Notification::success(format!(
                "Opened {} chat with {}",
                self.chat_app_name(),
                launch.label
            )));
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notify(notice.into());
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    pub fn tick(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.notifications.tick();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
