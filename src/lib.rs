pub mod catalog;
pub mod color;
pub mod compositor;
pub mod error;
pub mod gradient;
pub mod report;
pub mod theme_gen;

pub use catalog::{Catalog, Theme, TokenKeys};
pub use color::{Color, Palette};
pub use error::ThemeError;
pub use theme_gen::{generate_themes, BatchConfig, InputRole};
