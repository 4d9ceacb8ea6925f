mod ops;
mod partition;
mod structures;
mod totals;

pub(self) use structures::{BoundarySet, PartitionSet};
pub use partition::{Partition, boundary_edges};
pub use totals::DistrictTotals;
