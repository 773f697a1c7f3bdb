use crate::constants::{STREAM_GENERATE_PATH, TWIRP_PATH_PREFIX};

/// The base address of a service, normalized once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    base_address: String, // Never ends with '/'
}

impl RpcEndpoint {
    pub fn new(base_address: impl Into<String>) -> Self {
        let mut base_address = base_address.into();

        while base_address.ends_with('/') {
            base_address.pop();
        }

        Self { base_address }
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// `{base}/twirp/{service}/{method}`
    pub fn method_url(&self, service_identifier: &str, method_name: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_address, TWIRP_PATH_PREFIX, service_identifier, method_name
        )
    }

    /// `{base}/stream/generate`
    pub fn stream_url(&self) -> String {
        format!("{}/{}", self.base_address, STREAM_GENERATE_PATH)
    }
}
