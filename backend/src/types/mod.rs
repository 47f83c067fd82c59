mod environment;
mod error;
mod extractors;

pub use environment::{Environment, PRESIGNED_URL_EXPIRY_SECS};
pub use error::{ApiErrorResponse, AppError};
pub use extractors::ValidatedQuery;
