pub mod commands;
pub mod dtos;
pub mod event_handlers;
pub mod queries;
pub mod services;
pub mod utils;
