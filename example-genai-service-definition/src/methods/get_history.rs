use crate::types::{GetHistoryRequest, GetHistoryResponse};
use genai_rpc_service::RpcMethod;

pub struct GetHistory;

impl RpcMethod for GetHistory {
    const METHOD_NAME: &'static str = "GetHistory";

    type Input = GetHistoryRequest;
    type Output = GetHistoryResponse;
}
