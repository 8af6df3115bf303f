//! gabarito-core — answer normalization, option resolution and exam scoring.
//!
//! The heart of this crate is the pair [`normalize::normalize`] and
//! [`resolve::resolve_to_canonical`], which reconcile inconsistently
//! formatted answers against a question's options. The remaining modules
//! load exams and score answer sheets on top of them.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod resolve;
pub mod scoring;
pub mod statistics;

pub use normalize::normalize;
pub use resolve::resolve_to_canonical;
