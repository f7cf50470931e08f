mod pagination;
mod scan;
mod search;

pub use pagination::*;
pub use scan::*;
pub use search::*;
