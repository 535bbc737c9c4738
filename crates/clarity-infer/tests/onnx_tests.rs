use clarity_base::Tensor;
use clarity_base::Vec2;
use clarity_infer::backends::onnx::{
    check_declared_shape, classify_load_error, ndarray_to_tensor, tensor_to_ndarray,
};
use clarity_infer::{Backend, Device, LoadError, ModelContract, ModelSource, OnnxBackend};

#[test]
fn test_onnx_backend_name() {
    assert_eq!(OnnxBackend::default().name(), "onnx");
}

#[test]
fn test_classify_missing_kernel_as_unsupported_op() {
    let err = classify_load_error(
        "[ONNXRuntimeError] : 9 : NOT_IMPLEMENTED : Could not find an implementation for DepthToSpace(13) node",
    );
    assert!(matches!(err, LoadError::UnsupportedOp(_)));
}

#[test]
fn test_classify_parse_failure_as_malformed() {
    let err = classify_load_error("Load model from memory failed:Protobuf parsing failed.");
    assert!(matches!(err, LoadError::Malformed(_)));
}

#[test]
fn test_tensor_to_ndarray_conversion() {
    let tensor = Tensor::new(vec![1, 1, 2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let array = tensor_to_ndarray(&tensor).unwrap();
    assert_eq!(array.shape(), &[1, 1, 2, 3]);
    assert_eq!(array[[0, 0, 1, 2]], 6.0);
}

#[test]
fn test_ndarray_to_tensor_is_row_major() {
    use ndarray::ArrayD;

    let array = ArrayD::<f32>::from_shape_vec(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    // transposed view iterates in logical order
    let transposed = array.t();
    let tensor = ndarray_to_tensor(transposed.view()).unwrap();
    assert_eq!(tensor.shape, vec![3, 2]);
    assert_eq!(tensor.data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

#[test]
fn test_load_rejects_garbage_bytes() {
    let result = OnnxBackend::default().load_model(
        ModelSource::Memory(b"definitely not a protobuf graph".to_vec()),
        ModelContract::default(),
    );
    assert!(matches!(result, Err(LoadError::Malformed(_))));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = OnnxBackend::default().load_model(
        ModelSource::File("/nonexistent/clarity/model.onnx".into()),
        ModelContract::default(),
    );
    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[cfg(not(feature = "cuda"))]
#[test]
fn test_cuda_without_feature_is_unsupported() {
    let backend = OnnxBackend::new(Device::Cuda { device_id: 0 });
    let result = backend.load_model(ModelSource::Memory(vec![]), ModelContract::default());
    assert_eq!(
        result.unwrap_err(),
        LoadError::UnsupportedDevice(Device::Cuda { device_id: 0 })
    );
}

#[test]
fn test_device_display() {
    assert_eq!(Device::Cpu.to_string(), "CPU");
    assert_eq!(Device::Cuda { device_id: 1 }.to_string(), "CUDA(device_id=1)");
}

#[test]
fn test_declared_shape_matches_contract() {
    let contract = ModelContract::default();
    assert!(check_declared_shape("input", &[1, 1, 240, 320], &contract.input).is_ok());
    assert!(check_declared_shape("output", &[1, 1, 480, 640], &contract.output).is_ok());
}

#[test]
fn test_dynamic_dims_accept_any_size() {
    let contract = ModelContract::default();
    assert!(check_declared_shape("input", &[-1, 1, -1, -1], &contract.input).is_ok());
}

#[test]
fn test_configured_size_differs_from_graph() {
    // FSRCNN x2 graph, but the contract asks for 640x480 input
    let contract = ModelContract::super_resolution(Vec2::new(640, 480), 2);
    let err = check_declared_shape("input", &[1, 1, 240, 320], &contract.input).unwrap_err();
    assert!(matches!(err, LoadError::ContractMismatch(_)));
    assert!(err.to_string().contains("input"));

    let err = check_declared_shape("output", &[1, 1, 480, 640], &contract.output).unwrap_err();
    assert!(matches!(err, LoadError::ContractMismatch(_)));
}

#[test]
fn test_declared_rank_differs_from_contract() {
    let contract = ModelContract::default();
    let err = check_declared_shape("input", &[1, 240, 320], &contract.input).unwrap_err();
    assert!(matches!(err, LoadError::ContractMismatch(_)));
}
