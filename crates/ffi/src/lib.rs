//! C ABI for firefly
//!
//! Every fallible function returns a [`FireflyErrorCode`] and records a
//! message retrievable with [`firefly_get_last_error`] on the same thread.
//! Buffers passed in are copied; buffers handed out are either owned by the
//! caller (release with the matching `*_free` / `*_destroy`) or borrowed with
//! a documented lifetime.

pub mod error;
mod helpers;
pub mod path;
pub mod projection;
pub mod simulation;
pub mod types;

pub use error::{firefly_get_last_error, firefly_get_last_error_code, FireflyErrorCode};
pub use path::{firefly_find_path, firefly_path_free};
pub use projection::firefly_project;
pub use simulation::{
    firefly_sim_destroy, firefly_sim_get_state, firefly_sim_new, firefly_sim_step, FireflySimInstance,
};
pub use types::{FireflyCoord, FireflyGeoPoint, FireflyPath, FireflySpreadParams};
