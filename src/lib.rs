#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;

pub mod errors;
pub mod id;
pub mod pack;

pub use crate::pack::Packfile;
pub use crate::pack::catalog::Catalog;
pub use crate::pack::object::{ Base, Kind, Object };
