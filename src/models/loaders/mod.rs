pub mod toml_loader;

pub use toml_loader::{load_taxonomy, load_taxonomy_or_builtin};
