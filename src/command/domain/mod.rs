//! Domain model for command definitions, invocations and admission.
//!
//! Everything here is synchronous and free of infrastructure: the registry,
//! admission pipeline and dispatcher in [`crate::command::services`] are
//! built from these types.

mod admission;
mod context;
mod definition;
mod error;
mod ids;
mod parameter;
mod parser;
mod response;

pub use admission::{AdmissionDecision, AdmissionDenial, Blacklist, RateDecision, RateLimitKey};
pub use context::{Invocation, InvocationContext, MemberTarget};
pub use definition::{CommandDefinition, CommandKind, CommandName, CooldownSpec};
pub use error::CommandDomainError;
pub use ids::{ChannelId, GuildId, InvocationId, RoleId, UserId};
pub use parameter::{CommandParameterSpec, validate_arguments, validate_parameter_definitions};
pub use parser::ParsedInvocation;
pub use response::{Attachment, CommandResponse, Embed, EmbedAuthor, EmbedField};
