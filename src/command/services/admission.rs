//! Ordered admission checks run before every command body.

use std::sync::Arc;
use tracing::debug;

use crate::command::{
    domain::{
        AdmissionDecision, AdmissionDenial, Blacklist, CommandDefinition, InvocationContext,
        RateDecision, RateLimitKey,
    },
    ports::{RateLimitResult, RateLimiter},
};

/// Runs the blacklist, permission and rate-limit checks in that order,
/// stopping at the first failure.
///
/// A passing rate-limit check consumes a quota slot, so [`Self::admit`] must
/// be called exactly once per real invocation.
#[derive(Clone)]
pub struct AdmissionPipeline<L>
where
    L: RateLimiter,
{
    blacklist: Arc<Blacklist>,
    rate_limiter: Arc<L>,
}

impl<L> AdmissionPipeline<L>
where
    L: RateLimiter,
{
    /// Creates a pipeline over a loaded blacklist and a shared limiter.
    #[must_use]
    pub const fn new(blacklist: Arc<Blacklist>, rate_limiter: Arc<L>) -> Self {
        Self {
            blacklist,
            rate_limiter,
        }
    }

    /// Decides whether `context` may run the command described by
    /// `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::ports::RateLimitError`] when the limiter
    /// state is unavailable. Denials are not errors.
    pub fn admit(
        &self,
        definition: &CommandDefinition,
        context: &InvocationContext,
    ) -> RateLimitResult<AdmissionDecision> {
        if self.blacklist.is_blacklisted(context.user_id()) {
            debug!(user = %context.user_id(), "admission denied: blacklisted");
            return Ok(AdmissionDecision::Denied(AdmissionDenial::Blacklisted));
        }

        let required = definition.required_roles();
        if !required.is_empty() && required.is_disjoint(context.user_roles()) {
            debug!(
                user = %context.user_id(),
                command = %definition.name(),
                "admission denied: missing role"
            );
            return Ok(AdmissionDecision::Denied(AdmissionDenial::MissingRole {
                required: required.clone(),
            }));
        }

        let Some(cooldown) = definition.cooldown() else {
            return Ok(AdmissionDecision::Admitted);
        };
        let key = RateLimitKey::new(
            definition.name().clone(),
            context.user_id(),
            context.guild_id(),
        );
        match self
            .rate_limiter
            .check_and_record(&key, context.timestamp(), cooldown)?
        {
            RateDecision::Allowed => Ok(AdmissionDecision::Admitted),
            RateDecision::Denied { retry_after } => {
                debug!(
                    user = %context.user_id(),
                    command = %definition.name(),
                    retry_after_ms = retry_after.num_milliseconds(),
                    "admission denied: on cooldown"
                );
                Ok(AdmissionDecision::Denied(AdmissionDenial::OnCooldown {
                    retry_after,
                }))
            }
        }
    }
}
