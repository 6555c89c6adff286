// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod consumption_api;
pub mod ndjson_stream;
pub mod tariff_table;
