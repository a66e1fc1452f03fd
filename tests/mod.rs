// Integration tests for schemacraft

pub mod cli;
pub mod helpers;
pub mod unit;
