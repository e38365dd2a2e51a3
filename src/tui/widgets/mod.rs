pub mod list;
pub mod text_input;

pub use list::ListState;
pub use text_input::TextInputState;
