pub mod colors;
pub mod tui_app;
pub mod widgets;
