pub mod catalog;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod protocol;
