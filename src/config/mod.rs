pub mod settings;
pub mod theme;

pub use settings::{data_dir, AppConfig};
pub use theme::{Theme, ThemePreset};
