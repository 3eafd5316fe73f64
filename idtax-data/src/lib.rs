pub mod input;
pub mod loader;
pub mod summary;

pub use input::{ParseAmountError, parse_amount};
pub use loader::{ClientLoader, ClientLoaderError, ClientRecord};
pub use summary::{ClientAssessment, DashboardTaxSummary, assess_clients};
