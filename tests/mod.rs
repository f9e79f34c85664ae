//! Consolidated workspace test suite for the relaypoint crates.
