pub mod location_service;
pub mod task_service;
