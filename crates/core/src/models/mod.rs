pub mod block;
pub mod capacity;
pub mod client;
pub mod conflict;
pub mod crew;
pub mod employee;
pub mod job;
pub mod window;

pub use block::{BlockStatus, JobTimeBlock};
pub use capacity::CrewDayCapacity;
pub use client::Client;
pub use conflict::{ConflictKind, ConflictMap, ConflictReason};
pub use crew::Crew;
pub use employee::Employee;
pub use job::Job;
pub use window::DayWindow;

pub type ClientId = i64;
pub type CrewId = i64;
pub type EmployeeId = i64;
pub type JobId = i64;
