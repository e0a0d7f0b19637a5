pub mod component_factory;
pub mod threaded_update_executor;
