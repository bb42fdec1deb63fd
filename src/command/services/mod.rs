//! Application services for command registration, admission and dispatch.

mod admission;
mod dispatch;
mod registry;

pub use admission::AdmissionPipeline;
pub use dispatch::{CommandDispatcher, DispatchError, InvocationRequest, denial_response};
pub use registry::{CommandDescriptor, CommandRegistry, RegistryError, RegistryResult};
