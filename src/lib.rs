pub mod athlete;
pub mod category;
pub mod cost;
pub mod plan;
pub mod prompt;
pub mod reconcile;
pub mod session;
pub mod store;

pub use athlete::AthleteRecord;
pub use category::WeightCategory;
pub use plan::TrainingPlan;
