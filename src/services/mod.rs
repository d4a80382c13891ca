pub mod library_controller;
pub mod status_service;
pub mod timer;
