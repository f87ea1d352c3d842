//! Phase scheduling for a creative studio's project tracker.
//!
//! Projects are split into ordered, contiguous phases. The [`schedule`]
//! module holds the date engine (ordering, cascade, redistribution and
//! template instantiation); [`planner`] runs the tracker's workflows on top
//! of a [`store::PhaseStore`].

pub mod config;
pub mod io;
pub mod model;
pub mod planner;
pub mod schedule;
pub mod store;
