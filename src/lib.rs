//! Mentor Scheduler - mentor availability and session booking service.
//!
//! Mentors publish recurring weekly availability windows in their own
//! timezone; users book mentoring sessions that are resolved to UTC and
//! checked against those windows, then confirmed, rescheduled or cancelled.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
