pub mod filter;
pub mod location;
pub mod session;
pub mod task;
