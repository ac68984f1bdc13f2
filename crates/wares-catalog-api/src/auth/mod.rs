//! Authentication: login credentials, bearer tokens, and the middleware that
//! guards the protected routes.

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod models;
