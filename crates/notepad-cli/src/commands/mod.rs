pub mod category;
pub mod common;
pub mod image;
pub mod note;
pub mod remind;
pub mod settings;
pub mod tag;
