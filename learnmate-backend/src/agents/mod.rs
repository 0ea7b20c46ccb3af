pub mod code_companion;
pub mod project_planner;
pub mod task_analyzer;
pub mod tutor;

pub use code_companion::CodeCompanion;
pub use project_planner::ProjectPlanner;
pub use task_analyzer::TaskAnalyzer;
pub use tutor::TutorAgent;
