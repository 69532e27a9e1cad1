mod overlaps;
mod owned_iter;
mod ref_iter;

pub use overlaps::*;
pub use owned_iter::*;
pub use ref_iter::*;
