pub mod distance;
pub mod projection;
pub mod proximity;

pub use distance::distance_km;
pub use projection::epsg5174_to_wgs84;
pub use proximity::{find_nearby, SearchError};
