//! Shared types for dnscover.
//!
//! * [`model`] - the property/record inventory decoded from the input file.
//! * [`config`] - run-wide settings and the report profile handed to the composer.

pub mod config;
pub mod model;
