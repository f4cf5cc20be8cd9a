//! CLI Commands

pub mod compare;
pub mod run;
