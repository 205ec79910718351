pub mod rest;
pub mod tools;
