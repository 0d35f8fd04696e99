//! Rail network directory server.
//!
//! Manages rail stations and the trains connecting them, with
//! multi-criteria train search and traffic statistics on top.

pub mod domain;
pub mod search;
pub mod service;
pub mod stats;
pub mod store;
pub mod web;
