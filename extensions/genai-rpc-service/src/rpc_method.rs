use serde::{Serialize, de::DeserializeOwned};

/// Couples a remote method's name with its request and response types.
///
/// Implementors are usually unit structs (e.g. `Generate`) living next to the
/// data model of the service. Serialization is always JSON, so there is no
/// per-method encode/decode logic to provide.
pub trait RpcMethod {
    /// The method name as it appears in the URL (e.g. `"Generate"`). Never empty.
    const METHOD_NAME: &'static str;

    /// The request body type.
    type Input: Serialize + Send + Sync;

    /// The response body type.
    type Output: DeserializeOwned + Send;
}
