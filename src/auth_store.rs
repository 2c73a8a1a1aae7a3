use crate::error::GatewayResult;
use crate::gateway::FixtureGateway;
use crate::model::User;

/// Thin session wrapper: a single boolean flag over two endpoints. The client
/// records authentication state only; nothing is enforced here.
pub struct AuthStore {
    gateway: FixtureGateway,
    authenticated: bool,
}

impl AuthStore {
    pub fn new(gateway: FixtureGateway) -> Self {
        Self {
            gateway,
            authenticated: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// `Ok(true)` only on HTTP 200; any other received status is `Ok(false)`.
    /// Transport failure surfaces as an error, with the flag left false.
    pub fn login(&mut self, email: &str, password: &str) -> GatewayResult<bool> {
        self.authenticated = false;
        let ok = self.gateway.login(email, password)?;
        self.authenticated = ok;
        Ok(ok)
    }

    /// Local only; no network call.
    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> GatewayResult<User> {
        self.gateway.register(name, email, password)
    }
}
