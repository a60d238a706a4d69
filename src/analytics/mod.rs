//! Request logging for the web dashboard.

pub mod logger;
