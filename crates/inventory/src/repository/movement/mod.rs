mod command;
mod query;

pub use self::query::MovementQueryRepository;
