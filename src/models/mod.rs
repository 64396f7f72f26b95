mod analytics;
mod change_point;
mod event;
mod impact;
mod price_point;

pub use analytics::{DatasetOverview, DateRange, PriceStats, ReturnStats, SummaryStats};
pub use change_point::ChangePointResult;
pub use event::EventRecord;
pub use impact::{ImpactDataPoint, ImpactResult};
pub use price_point::{PricePoint, PriceRecord};
