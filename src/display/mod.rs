pub mod input;
pub mod render;
pub mod terminal;

pub use input::run_input;
pub use render::Renderer;
pub use terminal::TerminalGuard;

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::io::stdout;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::DisplayConfig;
use crate::simulation::Snapshot;

/***************************************/
/*             Public API              */
/***************************************/

/// Draws every published snapshot until the clock hangs up.
pub fn run_display(snapshot_rx: cbc::Receiver<Snapshot>, config: &DisplayConfig) -> std::io::Result<()> {
    let mut renderer = Renderer::new(stdout(), config.log_lines);
    for snapshot in snapshot_rx.iter() {
        // Only the latest state matters
        let snapshot = snapshot_rx.try_iter().last().unwrap_or(snapshot);
        renderer.draw(&snapshot)?;
    }
    Ok(())
}
