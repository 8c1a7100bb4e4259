pub mod text;

pub use text::TextFormatter;
