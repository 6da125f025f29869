pub mod assembler;
pub mod collaboration;
pub mod config;
pub mod dispatcher;
pub mod generator;
pub mod klaim_emitter;
pub mod traversal;
