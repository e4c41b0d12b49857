//! groovebox - play the engine from a terminal
//!
//! Run with: cargo run --bin groovebox

mod audio;
mod keys;
mod ui;

use color_eyre::eyre::Result as EyreResult;
use groovebox_dsp::EngineConfig;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let audio = audio::start(EngineConfig::default())?;

    let mut terminal = ratatui::init();
    let res = ui::UiApp::new(audio).run(&mut terminal);
    ratatui::restore();

    res
}
