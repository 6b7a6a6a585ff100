pub mod analytics;
pub mod calendar;
pub mod settings;
pub mod trade;
