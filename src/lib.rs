pub mod config;
pub mod date;
pub mod default_colors;
pub mod display;
pub mod error;
pub mod openlib_schema;
pub mod openlibrary;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use openlibrary::Client;
pub use types::{locale::Locale, record::BookRecord};
