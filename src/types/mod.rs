pub mod locale;
pub mod record;
