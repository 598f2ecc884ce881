//! HTTP surface for the Fellini pipeline.
//!
//! Three routes mirror the orchestrator's public operations:
//! `POST /generate` runs the pipeline once, `GET /projects` lists stored
//! projects, and `GET /analytics` returns the aggregate insight report.
//! Pipeline failures surface as 500 with a generic message; fallback-path
//! substitutions inside the pipeline are invisible here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod routes;

pub use routes::router;
