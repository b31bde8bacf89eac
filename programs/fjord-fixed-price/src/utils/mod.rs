pub mod merkle;
pub mod ownable;
pub mod safe_math;
pub mod standard_checks;
pub mod transfer;

pub use merkle::*;
pub use ownable::*;
pub use safe_math::*;
pub use standard_checks::*;
pub use transfer::*;
