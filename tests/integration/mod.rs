//! Integration tests with mock HTTP server

pub mod mock_server;
pub mod executor;
pub mod oauth;
pub mod nlu;
