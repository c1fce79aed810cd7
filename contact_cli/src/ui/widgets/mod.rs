pub mod burst;
pub mod button;
pub mod field;
pub mod status;

pub use burst::BurstLayer;
pub use button::SubmitButton;
pub use field::FieldWidget;
pub use status::StatusLine;
