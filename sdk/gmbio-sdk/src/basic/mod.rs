pub mod client;
pub mod controller;
pub mod display;
pub mod form;
pub mod reader;
