pub mod error;
pub mod i18n;

pub use error::{ApiError, ApiResult};
pub use i18n::{Locale, extract_locale_from_header};
