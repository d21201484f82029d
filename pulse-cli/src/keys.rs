//! Key bindings.
//!
//! | Key              | Action                         |
//! |------------------|--------------------------------|
//! | `q`, `Ctrl+C`    | quit                           |
//! | `r`              | refresh visible panels         |
//! | `Tab`            | focus next visible panel       |
//! | `1`-`4`          | focus weather/crypto/news/github |
//! | `w` `c` `n` `g`  | toggle weather/crypto/news/github |
//! | `↑`/`k`, `↓`/`j` | move selection in a list panel |
//! | `o`, `Enter`     | open the selected link         |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pulse::dashboard::Action;
use pulse::source::SourceId;

/// Translate a key press into a dashboard action.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::Char(digit @ '1'..='4') => {
            SourceId::from_index(digit as usize - '1' as usize).map(Action::Focus)
        }
        KeyCode::Char('w') => Some(Action::Toggle(SourceId::Weather)),
        KeyCode::Char('c') => Some(Action::Toggle(SourceId::Crypto)),
        KeyCode::Char('n') => Some(Action::Toggle(SourceId::News)),
        KeyCode::Char('g') => Some(Action::Toggle(SourceId::Activity)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Enter | KeyCode::Char('o') => Some(Action::OpenSelected),
        _ => None,
    }
}

/// Toggle key shown in the footer for each source.
pub fn toggle_key(source: SourceId) -> char {
    match source {
        SourceId::Weather => 'w',
        SourceId::Crypto => 'c',
        SourceId::News => 'n',
        SourceId::Activity => 'g',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_plain_c_toggles_crypto() {
        assert_eq!(
            action_for(press(KeyCode::Char('c'))),
            Some(Action::Toggle(SourceId::Crypto))
        );
    }

    #[test]
    fn test_digits_focus_sources() {
        assert_eq!(
            action_for(press(KeyCode::Char('1'))),
            Some(Action::Focus(SourceId::Weather))
        );
        assert_eq!(
            action_for(press(KeyCode::Char('4'))),
            Some(Action::Focus(SourceId::Activity))
        );
        assert_eq!(action_for(press(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_navigation_aliases() {
        assert_eq!(action_for(press(KeyCode::Up)), Some(Action::SelectPrev));
        assert_eq!(action_for(press(KeyCode::Char('j'))), Some(Action::SelectNext));
        assert_eq!(action_for(press(KeyCode::Enter)), Some(Action::OpenSelected));
        assert_eq!(action_for(press(KeyCode::Tab)), Some(Action::FocusNext));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for(release), None);
    }

    #[test]
    fn test_toggle_keys_match_bindings() {
        for source in SourceId::ALL {
            assert_eq!(
                action_for(press(KeyCode::Char(toggle_key(source)))),
                Some(Action::Toggle(source))
            );
        }
    }
}
