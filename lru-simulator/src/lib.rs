// LRU Simulator Library

pub mod generator;
pub mod models;
pub mod repl;
pub mod runner;
pub mod stats;
