// Tally: engagement leaderboards for X communities.
//
// This is the library root. Each module corresponds to one stage of the
// collection job: config wires the run, socialdata talks to the API,
// pipeline collects and aggregates, store persists the artifacts.

pub mod config;
pub mod pipeline;
pub mod socialdata;
pub mod store;
