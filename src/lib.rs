pub mod common;
pub mod gateway;
pub mod indicator;
pub mod session;
pub mod ui;
