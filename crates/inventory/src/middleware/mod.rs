mod extract;

pub use self::extract::{JsonBody, QueryParams};
