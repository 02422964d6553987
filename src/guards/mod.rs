pub mod auth;
pub mod owner;

pub use auth::AuthGuard;
pub use owner::OwnerGuard;
