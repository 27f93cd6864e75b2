//! Install and update affordances for the page hosting the game.
//!
//! The host feeds registration and prompt events in and carries out the
//! returned actions (toggle buttons, show the install prompt, post the
//! `skip-waiting` message, reload).

use log::{info, warn};

use crate::shell::{WorkerMessage, WorkerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    /// The worker script registered. `waiting` is set when a newer version is
    /// already installed and waiting to take over.
    Registered { waiting: bool },
    RegistrationFailed(String),
    /// A different worker now controls the page.
    ControllerChanged,
    /// The worker being installed after an update moved to `state`.
    InstallingStateChanged { state: WorkerState, has_controller: bool },
    /// The platform offered to install the app; the prompt is deferred.
    InstallPromptOffered,
    InstallClicked,
    /// The user answered the install prompt, either way.
    InstallChoiceMade,
    RefreshClicked { has_controller: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowInstall,
    HideInstall,
    ShowRefresh,
    PromptInstall,
    /// Post this message to the controlling worker.
    PostMessage(WorkerMessage),
    Reload,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateController {
    install_visible: bool,
    refresh_visible: bool,
    deferred_prompt: bool,
    refreshing: bool,
}

impl UpdateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_visible(&self) -> bool {
        self.install_visible
    }

    pub fn refresh_visible(&self) -> bool {
        self.refresh_visible
    }

    pub fn handle(&mut self, event: UpdateEvent) -> Vec<Action> {
        match event {
            UpdateEvent::Registered { waiting } => {
                info!("worker registered (waiting: {})", waiting);
                if waiting { self.show_refresh() } else { vec![] }
            }
            UpdateEvent::RegistrationFailed(reason) => {
                warn!("worker registration failed, playing online only: {}", reason);
                vec![]
            }
            UpdateEvent::ControllerChanged => {
                if self.refreshing {
                    return vec![];
                }
                self.refreshing = true;
                self.show_refresh()
            }
            UpdateEvent::InstallingStateChanged { state, has_controller } => {
                if state == WorkerState::Installed && has_controller {
                    self.show_refresh()
                } else {
                    vec![]
                }
            }
            UpdateEvent::InstallPromptOffered => {
                self.deferred_prompt = true;
                self.install_visible = true;
                vec![Action::ShowInstall]
            }
            UpdateEvent::InstallClicked => {
                if self.deferred_prompt { vec![Action::PromptInstall] } else { vec![] }
            }
            UpdateEvent::InstallChoiceMade => {
                if !self.deferred_prompt {
                    return vec![];
                }
                self.deferred_prompt = false;
                self.install_visible = false;
                vec![Action::HideInstall]
            }
            UpdateEvent::RefreshClicked { has_controller } => {
                if !has_controller {
                    return vec![];
                }
                info!("asking the waiting worker to take over");
                vec![Action::PostMessage(WorkerMessage::SkipWaiting), Action::Reload]
            }
        }
    }

    fn show_refresh(&mut self) -> Vec<Action> {
        if self.refresh_visible {
            return vec![];
        }
        self.refresh_visible = true;
        vec![Action::ShowRefresh]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiting_worker_shows_refresh() {
        let mut ctl = UpdateController::new();
        assert_eq!(ctl.handle(UpdateEvent::Registered { waiting: false }), vec![]);
        assert!(!ctl.refresh_visible());
        assert_eq!(ctl.handle(UpdateEvent::Registered { waiting: true }), vec![Action::ShowRefresh]);
        assert!(ctl.refresh_visible());
    }

    #[test]
    fn registration_failure_is_ignored() {
        let mut ctl = UpdateController::new();
        assert_eq!(ctl.handle(UpdateEvent::RegistrationFailed("insecure origin".into())), vec![]);
        assert!(!ctl.refresh_visible());
        assert!(!ctl.install_visible());
    }

    #[test]
    fn installed_update_needs_an_existing_controller() {
        let mut ctl = UpdateController::new();
        let first_install = UpdateEvent::InstallingStateChanged { state: WorkerState::Installed, has_controller: false };
        assert_eq!(ctl.handle(first_install), vec![]);

        let still_installing = UpdateEvent::InstallingStateChanged { state: WorkerState::Installing, has_controller: true };
        assert_eq!(ctl.handle(still_installing), vec![]);

        let update = UpdateEvent::InstallingStateChanged { state: WorkerState::Installed, has_controller: true };
        assert_eq!(ctl.handle(update), vec![Action::ShowRefresh]);
    }

    #[test]
    fn controller_change_reacts_once() {
        let mut ctl = UpdateController::new();
        assert_eq!(ctl.handle(UpdateEvent::ControllerChanged), vec![Action::ShowRefresh]);
        assert_eq!(ctl.handle(UpdateEvent::ControllerChanged), vec![]);
    }

    #[test]
    fn refresh_posts_skip_waiting_then_reloads() {
        let mut ctl = UpdateController::new();
        assert_eq!(ctl.handle(UpdateEvent::RefreshClicked { has_controller: false }), vec![]);
        assert_eq!(
            ctl.handle(UpdateEvent::RefreshClicked { has_controller: true }),
            vec![Action::PostMessage(WorkerMessage::SkipWaiting), Action::Reload]
        );
    }

    #[test]
    fn install_prompt_lifecycle() {
        let mut ctl = UpdateController::new();
        assert_eq!(ctl.handle(UpdateEvent::InstallClicked), vec![]);

        assert_eq!(ctl.handle(UpdateEvent::InstallPromptOffered), vec![Action::ShowInstall]);
        assert!(ctl.install_visible());
        assert_eq!(ctl.handle(UpdateEvent::InstallClicked), vec![Action::PromptInstall]);
        assert_eq!(ctl.handle(UpdateEvent::InstallChoiceMade), vec![Action::HideInstall]);
        assert!(!ctl.install_visible());

        assert_eq!(ctl.handle(UpdateEvent::InstallClicked), vec![]);
        assert_eq!(ctl.handle(UpdateEvent::InstallChoiceMade), vec![]);
    }
}
