// Internal types - passed between API, services and stores
pub mod context;
pub mod date_range;
pub mod query;
pub mod query_params;
pub mod stat_rows;

pub use context::{RequestContext, RequestId, RequestSource};
pub use date_range::DateRange;
pub use query::{LogQuery, PageRequest, UserQuery, MAX_PAGE_SIZE};
pub use query_params::{ParamValue, QueryParams};
pub use stat_rows::{DailyCountRow, SensorRow, SensorSlotRow, SENSOR_SLOTS};
