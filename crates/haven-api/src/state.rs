use std::sync::Arc;

use haven_core::services::{IdentityService, TenancyService};
use haven_security::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub tenancy: Arc<TenancyService>,
    pub tokens: Arc<TokenService>,
}
