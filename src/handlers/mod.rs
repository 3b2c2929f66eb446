// src/handlers/mod.rs

pub mod catalog;
pub mod practice;
pub mod profile;
pub mod ranking;
pub mod statistics;
