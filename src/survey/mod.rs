pub mod schema;
pub mod table;

pub use schema::ResolvedSchema;
pub use table::{ResponseRow, SurveyTable};
