// Domain layer - Tariffs, billing rules and consumption models
pub mod billing;
pub mod consumption;
pub mod error;
pub mod history;
pub mod insight;
pub mod statement;
pub mod tariff;
