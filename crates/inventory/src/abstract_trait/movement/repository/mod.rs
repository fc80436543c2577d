mod command;
mod query;

pub use self::command::MovementCommandRepositoryTrait;
pub use self::query::{DynMovementQueryRepository, MovementQueryRepositoryTrait};
