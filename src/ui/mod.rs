pub mod view;
pub mod scheduler;
pub mod controller;
pub mod console;
