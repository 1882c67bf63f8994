//! # SQL Validator Library
//!
//! Heuristic validation engine for SQL statements.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod existence;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod validator;
