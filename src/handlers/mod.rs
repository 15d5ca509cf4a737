pub mod rest;
pub mod spa;
