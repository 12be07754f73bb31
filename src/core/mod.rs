// src/core/mod.rs

pub mod address;
pub mod catalog;
pub mod html;
pub mod net;
pub mod numbers;
pub mod sanitize;
