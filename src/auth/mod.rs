pub mod actor;
pub mod authorization;
pub mod csrf;
pub mod jwt;
pub mod middleware;

pub use actor::Actor;
