pub mod discord;
pub mod gateway;
pub mod github;
