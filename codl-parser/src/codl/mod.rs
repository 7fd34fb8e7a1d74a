//! Main module for codl library functionality

pub mod ast;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod testing;
