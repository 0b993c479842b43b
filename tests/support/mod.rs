#![allow(dead_code)]

pub mod architecture;
pub mod payloads;
pub mod workers;
