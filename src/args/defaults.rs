pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hpa-load/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_ENDPOINT: &str = "/stress.php?cpu=2&duration=15";
