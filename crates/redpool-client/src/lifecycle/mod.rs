//! Status waiting and coordinated shutdown.

pub mod shutdown;
pub mod waiter;
