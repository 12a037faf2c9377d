//! Tests for the activation functions built atop the unary transform and
//! pairwise-broadcast kernels.

use approx::assert_relative_eq;
use tensorwalk::Tensor;

#[test]
fn test_relu_zeroes_negatives() {
    let t = Tensor::from_slice(&[-2.0f32, 0.0, 3.0]).unwrap();
    assert_eq!(t.relu().unwrap().to_vec(), vec![0.0, 0.0, 3.0]);
}

#[test]
fn test_sigmoid_is_bounded_and_centered_at_half() {
    let t = Tensor::from_slice(&[0.0f32]).unwrap();
    assert_relative_eq!(t.sigmoid().unwrap().to_vec()[0], 0.5);
}

#[test]
fn test_silu_is_x_times_sigmoid() {
    let t = Tensor::from_slice(&[2.0f32]).unwrap();
    let silu = t.silu().unwrap().to_vec()[0];
    let expected = 2.0 * t.sigmoid().unwrap().to_vec()[0];
    assert_relative_eq!(silu, expected);
}

#[test]
fn test_gelu_near_zero_is_near_zero() {
    let t = Tensor::from_slice(&[0.0f32]).unwrap();
    assert_relative_eq!(t.gelu().unwrap().to_vec()[0], 0.0, epsilon = 1e-6);
}

#[test]
fn test_softplus_at_zero_is_ln2() {
    let t = Tensor::from_slice(&[0.0f32]).unwrap();
    assert_relative_eq!(t.softplus().unwrap().to_vec()[0], core::f32::consts::LN_2);
}

#[test]
fn test_leaky_relu_scales_negatives() {
    let t = Tensor::from_slice(&[-2.0f32, 3.0]).unwrap();
    assert_eq!(t.leaky_relu(0.1).unwrap().to_vec(), vec![-0.2, 3.0]);
}

#[test]
fn test_elu_is_identity_for_positives() {
    let t = Tensor::from_slice(&[2.0f32, -1.0]).unwrap();
    let out = t.elu(1.0).unwrap().to_vec();
    assert_relative_eq!(out[0], 2.0);
    assert_relative_eq!(out[1], (-1.0f32).exp() - 1.0, epsilon = 1e-6);
}

#[test]
fn test_selu_matches_fixed_constants() {
    let t = Tensor::from_slice(&[1.0f32]).unwrap();
    let out = t.selu().unwrap().to_vec()[0];
    assert_relative_eq!(out, 1.0507009873554805, epsilon = 1e-5);
}

#[test]
fn test_prelu_uses_per_element_alpha() {
    let t = Tensor::from_slice(&[-2.0f32, 3.0]).unwrap();
    let alpha = Tensor::from_slice(&[0.5f32, 0.5]).unwrap();
    assert_eq!(t.prelu(&alpha).unwrap().to_vec(), vec![-1.0, 3.0]);
}

#[test]
fn test_softmax_sums_to_one_along_dim() {
    let t = Tensor::from_shape_slice(&[2, 3], &[1.0f32, 2.0, 3.0, 1.0, 1.0, 1.0]).unwrap();
    let s = t.softmax(-1).unwrap();
    let v = s.to_vec();
    assert_relative_eq!(v[0] + v[1] + v[2], 1.0, epsilon = 1e-6);
    assert_relative_eq!(v[3] + v[4] + v[5], 1.0, epsilon = 1e-6);
    // uniform logits -> uniform distribution
    assert_relative_eq!(v[3], 1.0 / 3.0, epsilon = 1e-6);
}

#[test]
fn test_softmax_is_shift_invariant() {
    let a = Tensor::from_slice(&[1.0f32, 2.0, 3.0]).unwrap();
    let b = Tensor::from_slice(&[101.0f32, 102.0, 103.0]).unwrap();
    let sa = a.softmax(0).unwrap().to_vec();
    let sb = b.softmax(0).unwrap().to_vec();
    for (x, y) in sa.iter().zip(sb) {
        assert_relative_eq!(*x, y, epsilon = 1e-5);
    }
}

#[test]
fn test_softmax_cross_entropy_grad_is_softmax_minus_target() {
    let logits = Tensor::from_slice(&[1.0f32, 2.0, 3.0]).unwrap();
    let target = Tensor::from_slice(&[0.0f32, 0.0, 1.0]).unwrap();
    let grad = logits.softmax_cross_entropy_grad(&target, 0).unwrap();
    let expected = logits.softmax(0).unwrap().sub(&target).unwrap();
    assert_eq!(grad.to_vec(), expected.to_vec());
}

#[test]
fn test_softmax_rejects_out_of_range_dim() {
    let t = Tensor::from_slice(&[1.0f32, 2.0]).unwrap();
    assert!(t.softmax(5).is_err());
}
