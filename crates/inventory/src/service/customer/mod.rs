mod command;

pub use self::command::{CustomerCommandService, CustomerCommandServiceDeps};
