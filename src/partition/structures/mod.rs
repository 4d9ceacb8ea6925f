mod boundary_set;
mod partition_set;

pub(crate) use boundary_set::BoundarySet;
pub(crate) use partition_set::PartitionSet;
