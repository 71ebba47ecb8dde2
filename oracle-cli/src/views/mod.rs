//! The two input surfaces. Each owns its own state value and shares
//! nothing with the other.

pub mod image;
pub mod text;

pub use image::{ImageView, ImageViewState, LoadedImage};
pub use text::{TextView, TextViewState};
