//! Image loading and PNG saving for the paint surface.

pub mod load;
pub mod save;

pub use load::{ImageSource, decode_image, load_image, read_image};
pub use save::{FileSaveConfig, expand_tilde, generate_filename, save_image, save_png};
