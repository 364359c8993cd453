use crate::app::{AppState, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Creating => handle_creating_mode(app, key),
        UiMode::EditingTime => handle_edit_time_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_up();
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_down();
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        // Start/pause the selected task
        KeyCode::Enter => {
            app.toggle_run_pause();
            Ok(false)
        }

        // Complete
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.complete_selected();
            Ok(false)
        }

        // Reopen a completed task
        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.reopen_selected();
            Ok(false)
        }

        // Toggle urgency
        KeyCode::Char('u') | KeyCode::Char('U') => {
            app.toggle_urgent_selected();
            Ok(false)
        }

        // Edit the counter by hand
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_time();
            Ok(false)
        }

        // Delete
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // New task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_create();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the creation form is open
fn handle_creating_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_create();
            Ok(false)
        }
        KeyCode::Enter => {
            app.submit_create_step();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.form_input_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys while the duration edit modal is open
fn handle_edit_time_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_edit_time();
            Ok(false)
        }
        KeyCode::Enter => {
            app.submit_edit_time();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => {
            app.form_input_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}
