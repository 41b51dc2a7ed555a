//! Core module - sensor service restart detection

mod restart_waiter;
mod service_registry;

pub use restart_waiter::{RestartWaiter, WaiterState};
pub use service_registry::{ServiceManager, ServiceNotification, ServiceRegistry};
