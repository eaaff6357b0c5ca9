pub mod age_grade;
pub mod browser;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod parse;
pub mod render;
pub mod scoring;
pub mod standings;
