use crate::types::{ListModelsRequest, ListModelsResponse};
use genai_rpc_service::RpcMethod;

pub struct ListModels;

impl RpcMethod for ListModels {
    const METHOD_NAME: &'static str = "ListModels";

    type Input = ListModelsRequest;
    type Output = ListModelsResponse;
}
