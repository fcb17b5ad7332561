//! The scheduling policies.
//!
//! Each policy lives in its own file and is exported here.

mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::Sjf;

mod round_robin;
pub use round_robin::RoundRobin;
