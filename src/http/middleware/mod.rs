pub mod cors;
pub mod static_guard;

pub use cors::cors_middleware;
pub use static_guard::{static_guard_middleware, StaticGuard};
