//! Ray queries recorded during rendering.
//!
//! - [`CastHitQuery`] / [`CastMissQuery`] - camera and bounce rays
//! - [`ShadowQuery`] - occlusion tests toward a light sample
//! - [`RaySet`] - one trace session, plus [`ShadowStats`]

mod query;
mod ray_set;

pub use query::*;
pub use ray_set::*;
