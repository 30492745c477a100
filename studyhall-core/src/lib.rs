pub mod action;
pub mod api;
pub mod booking;
pub mod config;
pub mod constants;
pub mod event;
pub mod grid;
pub mod modal;
pub mod poller;
pub mod seat;
pub mod session;
pub mod state;
pub mod ticket;
pub mod validate;
