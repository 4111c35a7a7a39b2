/// Grid walk, canvas painting and final blend
pub mod executor;
/// Anti-cluster and noise tile placement policies
pub mod placement;
