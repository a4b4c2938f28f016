//! Inference request/response messages.

use std::collections::HashMap;

use serde::Serialize;

use crate::json::base64_seq;

/// Request for `ModelInfer`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelInferRequest {
    #[prost(string, tag = "1")]
    pub model_name: String,
    /// Empty selects the server's version policy (latest).
    #[prost(string, tag = "2")]
    pub model_version: String,
    /// Optional request identifier, echoed back in the response.
    #[prost(string, tag = "3")]
    pub id: String,
    #[prost(map = "string, message", tag = "4")]
    pub parameters: HashMap<String, InferParameter>,
    #[prost(message, repeated, tag = "5")]
    pub inputs: Vec<InferInputTensor>,
    #[prost(message, repeated, tag = "6")]
    pub outputs: Vec<InferRequestedOutputTensor>,
    /// Raw input tensor data, one entry per input, in `inputs` order.
    /// When used, `contents` of every input must be unset.
    #[prost(bytes = "vec", repeated, tag = "7")]
    #[serde(serialize_with = "base64_seq")]
    pub raw_input_contents: Vec<Vec<u8>>,
}

/// One input tensor of a [`ModelInferRequest`].
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct InferInputTensor {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub datatype: String,
    #[prost(int64, repeated, tag = "3")]
    pub shape: Vec<i64>,
    #[prost(map = "string, message", tag = "4")]
    pub parameters: HashMap<String, InferParameter>,
    #[prost(message, optional, tag = "5")]
    pub contents: Option<InferTensorContents>,
}

/// An output tensor requested from a [`ModelInferRequest`].
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct InferRequestedOutputTensor {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(map = "string, message", tag = "2")]
    pub parameters: HashMap<String, InferParameter>,
}

/// Response for `ModelInfer`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelInferResponse {
    #[prost(string, tag = "1")]
    pub model_name: String,
    #[prost(string, tag = "2")]
    pub model_version: String,
    #[prost(string, tag = "3")]
    pub id: String,
    #[prost(map = "string, message", tag = "4")]
    pub parameters: HashMap<String, InferParameter>,
    #[prost(message, repeated, tag = "5")]
    pub outputs: Vec<InferOutputTensor>,
    /// Raw output tensor data, one entry per output, in `outputs` order.
    #[prost(bytes = "vec", repeated, tag = "6")]
    #[serde(serialize_with = "base64_seq")]
    pub raw_output_contents: Vec<Vec<u8>>,
}

/// One output tensor of a [`ModelInferResponse`].
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct InferOutputTensor {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub datatype: String,
    #[prost(int64, repeated, tag = "3")]
    pub shape: Vec<i64>,
    #[prost(map = "string, message", tag = "4")]
    pub parameters: HashMap<String, InferParameter>,
    #[prost(message, optional, tag = "5")]
    pub contents: Option<InferTensorContents>,
}

/// Typed tensor data, the alternative to raw contents.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct InferTensorContents {
    #[prost(bool, repeated, tag = "1")]
    pub bool_contents: Vec<bool>,
    #[prost(int32, repeated, tag = "2")]
    pub int_contents: Vec<i32>,
    #[prost(int64, repeated, tag = "3")]
    pub int64_contents: Vec<i64>,
    #[prost(uint32, repeated, tag = "4")]
    pub uint_contents: Vec<u32>,
    #[prost(uint64, repeated, tag = "5")]
    pub uint64_contents: Vec<u64>,
    #[prost(float, repeated, tag = "6")]
    pub fp32_contents: Vec<f32>,
    #[prost(double, repeated, tag = "7")]
    pub fp64_contents: Vec<f64>,
    #[prost(bytes = "vec", repeated, tag = "8")]
    #[serde(serialize_with = "base64_seq")]
    pub bytes_contents: Vec<Vec<u8>>,
}

/// A request/tensor parameter value.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct InferParameter {
    #[prost(oneof = "infer_parameter::ParameterChoice", tags = "1, 2, 3, 4, 5")]
    pub parameter_choice: Option<infer_parameter::ParameterChoice>,
}

/// Nested types for [`InferParameter`].
pub mod infer_parameter {
    use serde::Serialize;

    #[derive(Clone, PartialEq, prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ParameterChoice {
        #[prost(bool, tag = "1")]
        BoolParam(bool),
        #[prost(int64, tag = "2")]
        Int64Param(i64),
        #[prost(string, tag = "3")]
        StringParam(String),
        #[prost(double, tag = "4")]
        DoubleParam(f64),
        #[prost(uint64, tag = "5")]
        Uint64Param(u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;
    use serde_json::json;

    #[test]
    fn test_infer_request_carries_raw_bytes_on_wire() {
        let request = ModelInferRequest {
            model_name: "simple".to_string(),
            inputs: vec![InferInputTensor {
                name: "INPUT".to_string(),
                datatype: "UINT8".to_string(),
                shape: vec![3],
                ..Default::default()
            }],
            outputs: vec![InferRequestedOutputTensor {
                name: "OUTPUT".to_string(),
                ..Default::default()
            }],
            raw_input_contents: vec![vec![1, 2, 3]],
            ..Default::default()
        };

        let decoded = ModelInferRequest::decode(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.inputs[0].shape, vec![3]);
        assert_eq!(decoded.raw_input_contents, vec![vec![1, 2, 3]]);
        assert_eq!(decoded.outputs[0].name, "OUTPUT");
    }

    #[test]
    fn test_infer_response_json_encodes_raw_output_as_base64() {
        let response = ModelInferResponse {
            model_name: "simple".to_string(),
            model_version: "1".to_string(),
            outputs: vec![InferOutputTensor {
                name: "OUTPUT".to_string(),
                datatype: "UINT8".to_string(),
                shape: vec![5],
                ..Default::default()
            }],
            raw_output_contents: vec![b"hello".to_vec()],
            ..Default::default()
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["model_name"], "simple");
        assert_eq!(json["outputs"][0]["name"], "OUTPUT");
        assert_eq!(json["outputs"][0]["shape"], json!([5]));
        assert!(json["outputs"][0]["contents"].is_null());
        assert_eq!(json["raw_output_contents"], json!(["aGVsbG8="]));
    }

    #[test]
    fn test_parameter_json_is_tagged_by_kind() {
        let param = InferParameter {
            parameter_choice: Some(infer_parameter::ParameterChoice::Int64Param(4)),
        };
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({"parameter_choice": {"int64_param": 4}})
        );
    }
}
