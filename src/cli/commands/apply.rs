//! Apply command implementation.
//!
//! Loads config, starts file logging and hands the terminal to the wizard.

use anyhow::Context;

use crate::config::KamikayaConfig;
use crate::logging;
use crate::tui::TuiApp;

/// Run the interactive wizard.
pub fn apply(no_intro: bool) -> anyhow::Result<()> {
    let mut config = KamikayaConfig::load(None).context("loading .kamikaya/config.json")?;
    if no_intro {
        config.tui.show_intro = false;
    }

    logging::init(&config.logging).context("starting log output")?;

    let mut app = TuiApp::new(config.wizard_policy(), &config.tui)
        .context("setting up the terminal")?;
    let result = app.run();
    app.cleanup().context("restoring the terminal")?;
    let submissions = result.context("running the wizard")?;

    if submissions > 0 {
        println!("\x1b[32m✓\x1b[0m {submissions} pengajuan terkirim");
    }
    Ok(())
}
