//! Execute Tool use case.
//!
//! Runs one tool call through the two-phase protocol:
//!
//! ```text
//! RECEIVED -> PARAMS_HYDRATED -> POLICY_CHECKED -> [SIMULATED]
//!   ReadOnly           -> executed
//!   Mutating, approved -> executed
//!   Mutating, not approved -> simulation returned, "not executed"
//! ```
//!
//! No state is kept between calls. An approved call is a complete
//! resubmission; it is simulated again and executed with the fees current
//! at that moment. Anything the chain reports between the two calls
//! (a moved gas price, a changed balance) is not compared against the
//! earlier simulation.

use std::sync::Arc;

use blockagent_domain::{
    DefaultToolValidator, ToolCall, ToolError, ToolOutcome, ToolParams, ToolValidator,
};
use tracing::{debug, info, warn};

use crate::policy_gate::PolicyGate;
use crate::ports::audit_log::{AuditRecord, AuditSink, NoAuditSink};
use crate::ports::chain_resolver::ChainResolver;
use crate::ports::signer::SignerProvider;
use crate::tools::{ToolContext, ToolRegistry};

/// Input for the [`ExecuteToolUseCase`].
#[derive(Debug, Clone)]
pub struct ExecuteToolInput {
    /// Requested tool, chain selector and params
    pub call: ToolCall,
    /// Params merged over `call.params`; overrides win
    pub overrides: ToolParams,
    /// Explicit approval for state-changing calls
    pub approve: bool,
}

impl ExecuteToolInput {
    pub fn new(call: ToolCall) -> Self {
        Self {
            call,
            overrides: ToolParams::new(),
            approve: false,
        }
    }

    pub fn with_overrides(mut self, overrides: ToolParams) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn approved(mut self, approve: bool) -> Self {
        self.approve = approve;
        self
    }
}

/// Use case running the simulate / approve / execute pipeline.
pub struct ExecuteToolUseCase {
    registry: Arc<ToolRegistry>,
    resolver: Arc<dyn ChainResolver>,
    signer: Arc<dyn SignerProvider>,
    policy: Arc<PolicyGate>,
    audit: Arc<dyn AuditSink>,
    validator: DefaultToolValidator,
}

impl Clone for ExecuteToolUseCase {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            resolver: self.resolver.clone(),
            signer: self.signer.clone(),
            policy: self.policy.clone(),
            audit: self.audit.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl ExecuteToolUseCase {
    pub fn new(
        registry: Arc<ToolRegistry>,
        resolver: Arc<dyn ChainResolver>,
        signer: Arc<dyn SignerProvider>,
        policy: Arc<PolicyGate>,
    ) -> Self {
        Self {
            registry,
            resolver,
            signer,
            policy,
            audit: Arc::new(NoAuditSink),
            validator: DefaultToolValidator,
        }
    }

    /// Create with an audit sink.
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one call to completion.
    pub async fn execute(&self, input: ExecuteToolInput) -> Result<ToolOutcome, ToolError> {
        let ExecuteToolInput {
            mut call,
            overrides,
            approve,
        } = input;

        let tool = self.registry.resolve(&call.tool_name)?;
        let chain = self.resolver.resolve(call.chain.as_deref())?;

        call.merge_overrides(overrides);
        tool.hydrate(&mut call)?;
        self.validator
            .validate(&call, tool.definition())
            .map_err(ToolError::Validation)?;

        let kind = tool.effective_kind(&call);
        info!(
            tool = %call.tool_name,
            chain = chain.network(),
            kind = %kind,
            approved = approve,
            "Executing tool"
        );

        let signer = if kind.requires_approval() {
            Some(self.signer.signer(chain.as_ref())?)
        } else {
            None
        };

        if let Err(e) = self.policy.check(&call, chain.as_ref()) {
            if e.is_policy_violation() {
                warn!(tool = %call.tool_name, error = %e, "Rejected by policy");
            } else {
                debug!(tool = %call.tool_name, error = %e, "Policy inputs invalid");
            }
            return Err(e);
        }

        let ctx = ToolContext::new(chain.as_ref(), signer.as_ref(), &call);
        let simulation = tool.simulate(&ctx).await?;

        if kind.requires_approval() && !approve {
            debug!(tool = %call.tool_name, "Approval not given, returning simulation");
            return Ok(ToolOutcome::withheld(simulation));
        }

        let result = tool.execute(&ctx).await?;

        self.audit.record(AuditRecord::executed(
            call.tool_name.clone(),
            Some(chain.network().to_string()),
            call.params.clone(),
            tool.audit_view(&result),
        ));
        info!(tool = %call.tool_name, "Tool executed");

        Ok(ToolOutcome::executed(simulation, result))
    }
}
