//! Binary ray dump format.
//!
//! Ray dumps record every query a renderer issued while tracing a scene.
//! All values are little-endian. Two layouts exist:
//!
//! ## Versioned
//!
//! ```text
//! +------------------+
//! | Magic: 1234      |  i32
//! +------------------+
//! | Version (1 | 2)  |  i32, 1 = records carry t
//! +------------------+
//! | Ray count        |  i32
//! +------------------+
//! | Records          |  type, origin, direction, [t], footer = 0
//! +------------------+
//! ```
//!
//! ## Legacy
//!
//! ```text
//! +------------------+
//! | Records          |  type, depth, origin, direction
//! +------------------+
//! | End: 9215        |  i32
//! +------------------+
//! ```

mod format;
mod reader;
mod writer;

pub use format::*;
pub use reader::*;
pub use writer::*;
