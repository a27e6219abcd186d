// ─── NeosPlus Launcher Core ───
// Keeps NeosPlus current inside a Neos install and starts Neos with it.
//
// Architecture:
//   core/
//     target/   — Install directory candidates + resolver
//     release/  — GitHub latest-release client + asset selection
//     install/  — Version marker, archive extraction, installer
//     launch/   — Host process spawner + running-host check
//     flow      — The four stages in order
//     config    — Persisted user preferences
//     status    — Stage transitions for the presentation layer

pub mod config;
pub mod error;
pub mod flow;
pub mod http;
pub mod install;
pub mod launch;
pub mod paths;
pub mod release;
pub mod status;
pub mod target;
