/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::simulation::Control;

/// Maps a key press to a clock control, if it is bound to one.
pub fn key_to_control(key: KeyEvent) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Char('p') => Some(Control::Toggle),
        KeyCode::Char('r') => Some(Control::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Control::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Control::Quit),
        _ => None,
    }
}

/**
 * Polls the keyboard and forwards bound keys to the clock.
 *
 * Returns after forwarding `Control::Quit`, or once the clock has hung up.
 */
pub fn run_input(control_tx: cbc::Sender<Control>, poll_interval: u64) -> std::io::Result<()> {
    loop {
        if !event::poll(Duration::from_millis(poll_interval))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if let Some(control) = key_to_control(key) {
                debug!("Key {:?} mapped to {:?}", key.code, control);
                if control_tx.send(control).is_err() || control == Control::Quit {
                    return Ok(());
                }
            }
        }
    }
}
