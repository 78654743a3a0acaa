use std::path::Path;

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tracing::{error, info};

use crate::app::{App, IntroPhase};
use crate::calendar;
use crate::popup;

/// Dispatch one key event. Returns false when the app should quit.
pub fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }

    match app.intro {
        IntroPhase::Waiting => match key.code {
            KeyCode::Char('q') => return false,
            // any other press wakes the rose
            _ => app.begin_intro(),
        },
        IntroPhase::Blooming | IntroPhase::Fading { .. } => {
            if key.code == KeyCode::Char('q') {
                return false;
            }
        }
        IntroPhase::Done => return handle_page_key(key.code, app),
    }
    true
}

fn handle_page_key(code: KeyCode, app: &mut App) -> bool {
    match code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('r') => app.popups.toggle(popup::RSVP_POPUP),
        KeyCode::Char('v') => app.popups.toggle(popup::VENUE_POPUP),
        KeyCode::Char('a') => app.popups.toggle(popup::PROGRAM_POPUP),
        KeyCode::Esc => app.popups.close_all(),
        KeyCode::Char('g') => {
            if let Some(link) = app.links.google() {
                let mut clipboard = Clipboard::new().ok();
                if let Some(cb) = clipboard.as_mut() {
                    let _ = cb.set_text(link.to_string());
                }
            }
        }
        // the terminal stand-in for the page's .ics link target
        KeyCode::Char('c') => {
            if let Some(payload) = app.links.ics() {
                let mut clipboard = Clipboard::new().ok();
                if let Some(cb) = clipboard.as_mut() {
                    let _ = cb.set_text(payload.uri.clone());
                }
            }
        }
        KeyCode::Char('s') => {
            if let Some(payload) = app.links.ics() {
                match calendar::save_ics(Path::new("."), payload) {
                    Ok(path) => info!("calendar file saved to {}", path.display()),
                    Err(err) => error!("could not save calendar file: {err}"),
                }
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.auto_scroll.stop();
            app.page.line_up();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.auto_scroll.stop();
            app.page.line_down();
        }
        KeyCode::PageUp => {
            app.auto_scroll.stop();
            app.page.page_up();
        }
        KeyCode::PageDown => {
            app.auto_scroll.stop();
            app.page.page_down();
        }
        KeyCode::Home => {
            app.auto_scroll.stop();
            app.page.to_top();
        }
        KeyCode::End => {
            app.auto_scroll.stop();
            app.page.to_bottom();
        }
        _ => {}
    }
    true
}

/// Mouse handling mirrors the page's touch behavior: a press wakes the
/// intro, and any press or wheel movement takes over from the drift.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    match app.intro {
        IntroPhase::Waiting => {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                app.begin_intro();
            }
        }
        IntroPhase::Done => match mouse.kind {
            MouseEventKind::ScrollUp => {
                app.auto_scroll.stop();
                app.page.line_up();
            }
            MouseEventKind::ScrollDown => {
                app.auto_scroll.stop();
                app.page.line_down();
            }
            MouseEventKind::Down(_) => app.auto_scroll.stop(),
            _ => {}
        },
        IntroPhase::Blooming | IntroPhase::Fading { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::player::RecordingPlayer;
    use crate::scroll::ScrollSurface;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseButton};
    use std::time::Instant;
    use tokio::runtime::Runtime;

    fn app() -> App {
        App::new(Settings::for_tests(), Box::new(RecordingPlayer::default())).unwrap()
    }

    fn revealed_app(rt: &Runtime) -> App {
        let mut app = app();
        app.skip_intro(rt, Instant::now());
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_in_every_phase() {
        let rt = Runtime::new().unwrap();

        let mut waiting = app();
        assert!(!handle_key(press(KeyCode::Char('q')), &mut waiting));

        let mut blooming = app();
        blooming.begin_intro();
        assert!(!handle_key(press(KeyCode::Char('q')), &mut blooming));

        let mut done = revealed_app(&rt);
        assert!(!handle_key(press(KeyCode::Char('q')), &mut done));
    }

    #[test]
    fn any_other_press_wakes_the_intro() {
        let mut app = app();
        assert!(handle_key(press(KeyCode::Enter), &mut app));
        assert_eq!(app.intro, IntroPhase::Blooming);
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(handle_key(release, &mut app));
        assert_eq!(app.intro, IntroPhase::Waiting);
    }

    #[test]
    fn popup_keys_only_work_on_the_revealed_page() {
        let rt = Runtime::new().unwrap();

        let mut blooming = app();
        blooming.begin_intro();
        handle_key(press(KeyCode::Char('r')), &mut blooming);
        assert!(blooming.popups.visible().is_none());

        let mut done = revealed_app(&rt);
        handle_key(press(KeyCode::Char('r')), &mut done);
        assert_eq!(done.popups.visible().map(|p| p.id), Some(popup::RSVP_POPUP));

        handle_key(press(KeyCode::Esc), &mut done);
        assert!(done.popups.visible().is_none());
    }

    #[test]
    fn copy_keys_keep_the_loop_running() {
        let rt = Runtime::new().unwrap();
        let mut app = revealed_app(&rt);

        // clipboard-less environments degrade to a silent no-op
        assert!(handle_key(press(KeyCode::Char('g')), &mut app));
        assert!(handle_key(press(KeyCode::Char('c')), &mut app));
    }

    #[test]
    fn scroll_keys_take_over_from_the_drift() {
        let rt = Runtime::new().unwrap();
        let mut app = revealed_app(&rt);
        app.page.note_dimensions(100, 20);
        assert!(app.auto_scroll.is_running());

        handle_key(press(KeyCode::Down), &mut app);
        assert!(!app.auto_scroll.is_running());
        assert_eq!(app.page.offset(), 1);
    }

    #[test]
    fn mouse_press_wakes_the_intro_and_later_stops_the_drift() {
        let rt = Runtime::new().unwrap();

        let mut waiting = app();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(click, &mut waiting);
        assert_eq!(waiting.intro, IntroPhase::Blooming);

        let mut done = revealed_app(&rt);
        assert!(done.auto_scroll.is_running());
        handle_mouse(click, &mut done);
        assert!(!done.auto_scroll.is_running());
    }

    #[test]
    fn wheel_scrolling_moves_the_page() {
        let rt = Runtime::new().unwrap();
        let mut app = revealed_app(&rt);
        app.page.note_dimensions(100, 20);

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(wheel, &mut app);
        handle_mouse(wheel, &mut app);
        assert_eq!(app.page.offset(), 2);
        assert!(!app.auto_scroll.is_running());
    }
}
