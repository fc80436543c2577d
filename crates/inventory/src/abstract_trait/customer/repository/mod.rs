mod command;
mod lookup;

pub use self::command::{CustomerCommandRepositoryTrait, DynCustomerCommandRepository};
pub use self::lookup::CustomerLookupRepositoryTrait;
