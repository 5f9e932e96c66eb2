//! Column resolution, alignment, projection and rearrangement

mod align;
mod arrange;
mod project;
mod resolve;

pub use align::auto_align;
pub use arrange::rearrange;
pub use project::{delete_columns, keep_columns, Projection};
pub use resolve::{common_columns, resolve};
