//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements  | Connects to                    |
//! |--------------|-------------|--------------------------------|
//! | `file_store` | ConfigPort  | 4-line pairing file on flash   |
//! | `log_sink`   | EventSink   | Serial log output              |
//! | `shutter`    | DrivePort   | H-bridge relay pair (stubbed)  |
//! | `time`       | Clock       | Monotonic system timer         |

pub mod file_store;
pub mod log_sink;
pub mod shutter;
pub mod time;
