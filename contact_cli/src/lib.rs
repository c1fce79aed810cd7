pub mod logging;
pub mod ui;

pub use logging::{init_file_logging, is_debug_enabled};
pub use ui::tui_app::{AppState, Focus, KeyOutcome, TuiApp};
