pub mod config;
pub mod handlers;
pub mod pdf;
pub mod report;
pub mod services;
pub mod startup;
