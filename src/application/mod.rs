// Application layer - Use cases and repository traits
pub mod billing_service;
pub mod consumption_repository;
pub mod dashboard_service;
pub mod history_service;
pub mod streaming_service;
pub mod tariff_repository;
