use crate::types::{GenerateRequest, GenerateResponse};
use genai_rpc_service::RpcMethod;

pub struct Generate;

impl RpcMethod for Generate {
    const METHOD_NAME: &'static str = "Generate";

    type Input = GenerateRequest;
    type Output = GenerateResponse;
}
