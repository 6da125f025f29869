pub mod process_model;
pub mod translation;
pub mod utils;
