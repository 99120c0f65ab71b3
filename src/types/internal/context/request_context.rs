use std::net::IpAddr;

use poem::Request;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows from the API layer into services
///
/// Carries what services need for tracing: the request id, where the call came
/// from and the client address.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    ///
    /// # Arguments
    /// * `command_name` - Name of the CLI command being executed
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Create a RequestContext for an HTTP request
    ///
    /// Called at the start of every mutating endpoint.
    pub fn from_request(req: &Request) -> Self {
        let ip_address = Self::extract_ip_address(req);
        let actor_id = ip_address
            .map(|ip| format!("api:{}", ip))
            .unwrap_or_else(|| "api:unknown".to_string());

        let ctx = Self {
            ip_address,
            request_id: RequestId::new(),
            source: RequestSource::API,
            actor_id,
        };

        tracing::trace!("Request context created: {:?}", ctx);

        ctx
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.trim().parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Set the actor_id
    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = actor_id.into();
        self
    }
}
