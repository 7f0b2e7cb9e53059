//! Process exit codes for the `keno` binary.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // bad cage settings, bind failure, logging setup
