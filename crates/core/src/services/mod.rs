pub mod analytics_service;
pub mod calendar_service;
pub mod display;
pub mod trade_builder;
