mod action_token;
mod credentials;
mod middleware;

pub use action_token::{ActionTokens, BULK_DELETE_ACTION, DELETE_ACTION};
pub use credentials::{
    basic_authentication, ensure_admin_configured, validate_admin, AdminUser, AuthError,
    Credentials,
};
pub use middleware::reject_unauthorized_admins;
