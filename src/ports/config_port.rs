//! Configuration access port: named string lookup by section and key.
//!
//! Typed parsing and range checks live in `domain::config_validation`.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
