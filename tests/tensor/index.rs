//! Tests for `argmax`, `argmin`, and `scatter`.

use tensorwalk::Tensor;

#[test]
fn test_argmax_drops_the_reduced_axis() {
    let t = Tensor::from_shape_slice(&[2, 3], &[1.0f32, 5.0, 3.0, 9.0, 2.0, 4.0]).unwrap();
    let r = t.argmax(1).unwrap();
    assert_eq!(r.dimensions(), &[2]);
    assert_eq!(r.to_vec(), vec![1.0, 0.0]);
}

#[test]
fn test_argmax_ties_resolve_to_earliest_index() {
    let t = Tensor::from_slice(&[1.0f32, 3.0, 3.0, 2.0]).unwrap();
    let r = t.argmax(0).unwrap();
    assert_eq!(r.to_vec(), vec![1.0]);
}

#[test]
fn test_argmin() {
    let t = Tensor::from_shape_slice(&[2, 3], &[3.0f32, 1.0, 2.0, 6.0, 4.0, 5.0]).unwrap();
    let r = t.argmin(1).unwrap();
    assert_eq!(r.to_vec(), vec![1.0, 0.0]);
}

#[test]
fn test_argmax_rejects_out_of_range_dim() {
    let t = Tensor::from_slice(&[1.0f32, 2.0]).unwrap();
    assert!(t.argmax(5).is_err());
}

#[test]
fn test_scatter_places_values_at_named_destination_coordinates() {
    // self[i] goes to dst[indices[i]] along dim 0; gaps stay zero.
    let values = Tensor::from_slice(&[10.0f32, 20.0, 30.0]).unwrap();
    let indices = Tensor::from_slice(&[4.0f32, 0.0, 2.0]).unwrap();
    let r = values.scatter(&indices, 0, &[5]).unwrap();
    assert_eq!(r.to_vec(), vec![20.0, 0.0, 30.0, 0.0, 10.0]);
}

#[test]
fn test_scatter_rejects_indices_shape_mismatch() {
    let values = Tensor::from_slice(&[10.0f32, 20.0]).unwrap();
    let indices = Tensor::from_slice(&[0.0f32, 1.0, 2.0]).unwrap();
    assert!(values.scatter(&indices, 0, &[3]).is_err());
}

#[test]
fn test_scatter_rejects_output_rank_mismatch() {
    let values = Tensor::from_slice(&[10.0f32, 20.0]).unwrap();
    let indices = Tensor::from_slice(&[0.0f32, 1.0]).unwrap();
    assert!(values.scatter(&indices, 0, &[2, 2]).is_err());
}
