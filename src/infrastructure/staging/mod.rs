mod scratch_staging;

pub use scratch_staging::ScratchStaging;
