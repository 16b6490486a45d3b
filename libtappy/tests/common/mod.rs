#![allow(dead_code)]

pub mod fixtures;

pub const PATH: &str = "/dev/ttyMOCK0";
