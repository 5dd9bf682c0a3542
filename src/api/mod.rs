//! API handlers for Folium REST endpoints

pub mod books;
pub mod customers;
pub mod health;
pub mod loans;
pub mod openapi;
