mod command;
mod query;

pub use self::command::{MovementCommandService, MovementCommandServiceDeps};
pub use self::query::{MovementQueryService, MovementQueryServiceDeps};
