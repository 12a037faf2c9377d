//! Tests for `reduce_sum`, `reduce_mean`, `reduce_prod`, `reduce_min`, and
//! `reduce_max`.

use tensorwalk::Tensor;

#[test]
fn test_reduce_sum_over_a_single_axis_drops_it() {
    let t = Tensor::from_shape_slice(&[2, 3], &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let r = t.reduce_sum(1, false).unwrap();
    assert_eq!(r.dimensions(), &[2]);
    assert_eq!(r.to_vec(), vec![6.0, 15.0]);
}

#[test]
fn test_reduce_sum_keep_dims_retains_rank() {
    let t = Tensor::from_shape_slice(&[2, 3], &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let r = t.reduce_sum(1, true).unwrap();
    assert_eq!(r.dimensions(), &[2, 1]);
    assert_eq!(r.to_vec(), vec![6.0, 15.0]);
}

#[test]
fn test_reduce_sum_negative_one_reduces_every_axis() {
    let t = Tensor::from_shape_slice(&[2, 2], &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let r = t.reduce_sum(-1, false).unwrap();
    assert_eq!(r.dimensions(), &[] as &[usize]);
    assert_eq!(r.to_vec(), vec![10.0]);
}

#[test]
fn test_reduce_sum_explicit_last_axis_via_array() {
    let t = Tensor::from_shape_slice(&[2, 3], &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let r = t.reduce_sum([-1], false).unwrap();
    assert_eq!(r.dimensions(), &[2]);
    assert_eq!(r.to_vec(), vec![6.0, 15.0]);
}

#[test]
fn test_reduce_sum_multiple_axes() {
    let t = Tensor::from_shape_slice(
        &[2, 2, 2],
        &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
    )
    .unwrap();
    let r = t.reduce_sum([0, 2], false).unwrap();
    assert_eq!(r.dimensions(), &[2]);
    assert_eq!(r.to_vec(), vec![1.0 + 2.0 + 5.0 + 6.0, 3.0 + 4.0 + 7.0 + 8.0]);
}

#[test]
fn test_reduce_mean() {
    let t = Tensor::from_shape_slice(&[2, 2], &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let r = t.reduce_mean(1, false).unwrap();
    assert_eq!(r.to_vec(), vec![1.5, 3.5]);
}

#[test]
fn test_reduce_prod() {
    let t = Tensor::from_shape_slice(&[2, 2], &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let r = t.reduce_prod(1, false).unwrap();
    assert_eq!(r.to_vec(), vec![2.0, 12.0]);
}

#[test]
fn test_reduce_min_and_max() {
    let t = Tensor::from_shape_slice(&[2, 3], &[3.0f32, 1.0, 2.0, 6.0, 5.0, 4.0]).unwrap();
    assert_eq!(t.reduce_min(1, false).unwrap().to_vec(), vec![1.0, 4.0]);
    assert_eq!(t.reduce_max(1, false).unwrap().to_vec(), vec![3.0, 6.0]);
}

#[test]
fn test_reduce_rejects_out_of_range_axis() {
    let t = Tensor::from_slice(&[1.0f32, 2.0]).unwrap();
    assert!(t.reduce_sum(5, false).is_err());
}
