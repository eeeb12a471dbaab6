pub mod invoker;
pub mod metrics;

pub use invoker::{InvokeError, SidecarInvoker};
