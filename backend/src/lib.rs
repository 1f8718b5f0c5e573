//! ServiceHub Backend Library
//!
//! Local-services marketplace: provider listings, bookings, gateway
//! payments, reviews, reports and messaging over a REST API.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod handlers;
pub mod message;
pub mod middleware;
pub mod models;
pub mod payment;
pub mod report;
pub mod repository;
pub mod review;
pub mod routes;
pub mod state;
pub mod users;
