pub mod breakdown;
pub mod resource;

pub use breakdown::{Category, Complexity, Prerequisite, TaskBreakdown};
pub use resource::LearningResource;
