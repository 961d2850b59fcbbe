//! Terminal front-end for the loan application wizard.
//!
//! Draws the loan card, progress dots and the current step, and turns key
//! presses into wizard actions.

mod app;
mod form;
mod ui;

pub use app::TuiApp;
pub use form::{is_image_path, Control, FormState, Status, StatusKind, IMAGE_EXTENSIONS};
