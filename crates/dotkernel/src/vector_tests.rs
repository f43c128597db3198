#![allow(clippy::float_cmp, clippy::cast_precision_loss)]
//! Tests for `StackVector`.

use super::error::Error;
use super::kernel::{generic, Generic};
use super::vector::StackVector;

#[test]
fn test_stack_vector_alignment() {
    assert_eq!(std::mem::align_of::<StackVector<f32, 32>>(), 32);
    assert_eq!(std::mem::align_of::<StackVector<u8, 3>>(), 32);
    let v = StackVector::<f32, 64>::zeros();
    assert_eq!(v.data.as_ptr() as usize % 32, 0);
}

#[test]
fn test_stack_vector_zeros_and_default() {
    let v = StackVector::<i32, 5>::zeros();
    assert_eq!(v.data, [0; 5]);
    assert_eq!(StackVector::<i32, 5>::default(), v);
}

#[test]
fn test_stack_vector_from_slice() {
    let v = StackVector::<f32, 3>::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(v.data, [1.0, 2.0, 3.0]);

    let err = StackVector::<f32, 3>::from_slice(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(
        err,
        Error::ShapeMismatch {
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn test_stack_vector_from_converted() {
    let v = StackVector::<f32, 3>::from_converted(&[1_i16, -2, 3]);
    assert_eq!(v.data, [1.0, -2.0, 3.0]);
}

#[test]
fn test_stack_vector_dequantize() {
    let q = StackVector::from_array([-2_i16, 0, 3]);
    assert_eq!(q.dequantize(0.5_f32).data, [-1.0, 0.0, 1.5]);

    let q = StackVector::from_array([1_i32 << 24, -7]);
    assert_eq!(q.dequantize(0.25_f64).data, [4_194_304.0, -1.75]);
}

#[test]
fn test_stack_vector_dot() {
    let v = StackVector::from_array([1.0_f32, 2.0, 3.0, 4.0]);
    assert_eq!(v.dot(&[5.0, 6.0, 7.0, 8.0]), 70.0);
    assert_eq!(v.dot_with(&Generic, &[5.0, 6.0, 7.0, 8.0]), 70.0);
}

#[test]
fn test_stack_vector_dot_blocked_len() {
    let a: StackVector<f32, 64> = StackVector::from_array(std::array::from_fn(|i| i as f32));
    let b = [0.5_f32; 64];
    // 0.5 * (0 + ... + 63) = 1008, exact for every summation order
    assert_eq!(a.dot(&b), 1008.0);
    assert_eq!(a.dot(&b), generic::dot(&a.data, &b));
}

#[test]
fn test_stack_vector_in_place_ops() {
    let mut v = StackVector::from_array([1_i64, 2, 3]);
    v.add_(&[10, 20, 30]);
    assert_eq!(v.data, [11, 22, 33]);
    v.sub_(&[1, 2, 3]);
    assert_eq!(v.data, [10, 20, 30]);
    v.fma_(2, &[1, 1, 1]);
    assert_eq!(v.data, [12, 22, 32]);
    v.apply_(|x| x.max(20));
    assert_eq!(v.data, [20, 22, 32]);
}

#[test]
fn test_stack_vector_fma_wraps_integers() {
    let mut v = StackVector::from_array([250_u8, 1]);
    v.fma_(2, &[3, 4]);
    assert_eq!(v.data, [0, 9]);
}

#[test]
fn test_stack_vector_chained_ops() {
    let mut v = StackVector::<f32, 2>::zeros();
    v.add_(&[1.0, -1.0]).apply_(|x| x.max(0.0)).fma_(3.0, &[1.0, 1.0]);
    assert_eq!(v.data, [4.0, 3.0]);
}

#[test]
fn test_stack_vector_item() {
    let v = StackVector::from_array([42_u32]);
    assert_eq!(v.item(), 42);
}

#[test]
fn test_stack_vector_deref() {
    let mut v = StackVector::from_array([1_u8, 2, 3]);
    assert_eq!(v.len(), 3);
    v[1] = 9;
    assert_eq!(v.iter().copied().sum::<u8>(), 13);
}

#[test]
fn test_stack_vector_display() {
    let v = StackVector::from_array([1, 2, 3]);
    assert_eq!(v.to_string(), "StackVector<3>([1, 2, 3])");
    let empty: StackVector<i32, 0> = StackVector::from_array([]);
    assert_eq!(empty.to_string(), "StackVector<0>([])");
}
