mod command;
mod lookup;

pub use self::command::CustomerCommandRepository;
