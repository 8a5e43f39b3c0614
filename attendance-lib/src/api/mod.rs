//! Backend endpoints
//!
//! Grouped the way the backend groups them; every group is reached through
//! an [`AttendanceClient`](crate::AttendanceClient) accessor.

mod attendance;
mod date;
mod envelope;
mod files;
mod mcid;
mod mcid_data;
mod request;

pub use attendance::*;
pub use date::*;
pub use envelope::*;
pub use files::*;
pub use mcid::*;
pub use mcid_data::*;
