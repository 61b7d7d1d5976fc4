//! Core of the report: the scan inventory model, the specifier override
//! policies and the services that operate on them. No I/O happens here.

pub mod domain;
pub mod policies;
pub mod services;
