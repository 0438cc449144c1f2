pub mod alerts;
pub mod demo;
pub mod products;
