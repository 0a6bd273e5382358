pub mod app_config;
pub mod choice;
pub mod constants;
pub mod db;
pub mod error;
pub mod middleware;
pub mod orm;
pub mod question;
pub mod web;
