pub mod file;
pub mod http;
pub mod traits;

pub use file::FileSessionStore;
pub use http::ApiClient;
pub use traits::{AuthApi, LocationRepository, TaskRepository};
