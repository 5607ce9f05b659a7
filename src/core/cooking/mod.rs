pub mod container;
pub mod cookable;
pub mod flip;
pub mod ingredients;
pub mod salting;

// Re-export commonly used types
pub use container::{Container, ContainerKind};
pub use cookable::{CookableItem, CookingState};
pub use flip::{apply_outcome, FlipInput, FlipOutcome, FlipRejection, FlipSession, HitGrade};
pub use ingredients::RawIngredient;
pub use salting::{SaltingRejection, SaltingSession, SaltingStatus, ShakeSide};
