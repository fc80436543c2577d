mod command;

pub use self::command::{CustomerCommandServiceTrait, DynCustomerCommandService};
