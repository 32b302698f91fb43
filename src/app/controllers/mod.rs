//! # Controllers Module
//!
//! Contains the controller that runs the event loop.

pub mod app_controller;

pub use app_controller::AppController;
