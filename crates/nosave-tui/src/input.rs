use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::App;

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    let code = key.code;

    if code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The access prompt takes every key until answered
    if app.permission_prompt {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.answer_permission(true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.answer_permission(false)
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter | KeyCode::Char('w') => app.open_selected_chat(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('x') => app.dismiss_notification(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::tests::{app_with, records, settle};
    use nosave_core::PermissionState;
    use std::sync::Arc;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_prompt_captures_keys() {
        let mut app = app_with(records(), PermissionState::Unknown, Arc::default());
        app.start();
        assert!(app.permission_prompt);

        // Quit keys don't leak through the prompt
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert!(app.permission_prompt);

        press(&mut app, KeyCode::Char('y'));
        assert!(!app.permission_prompt);
        settle(&mut app).await;
        assert_eq!(app.records().len(), 3);
    }

    #[tokio::test]
    async fn test_navigation_and_quit() {
        let mut app = app_with(records(), PermissionState::Granted, Arc::default());
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index(), 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_index(), 1);

        press(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_prompt() {
        let mut app = app_with(records(), PermissionState::Unknown, Arc::default());
        app.start();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }
}
