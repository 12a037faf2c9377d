//! Tests for `reshape`, `transpose`, and `tile`.

use tensorwalk::Tensor;

#[test]
fn test_reshape_preserves_data_in_order() {
    let t = Tensor::from_slice(&(0..12).map(|v| v as f32).collect::<Vec<_>>()).unwrap();
    let r = t.reshape(&[3, 4]).unwrap();
    assert_eq!(r.dimensions(), &[3, 4]);
    assert_eq!(r.to_vec(), t.to_vec());
}

#[test]
fn test_reshape_shares_buffer_when_contiguous() {
    let t = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let r = t.reshape(&[2, 2]).unwrap();
    r.fill(9.0);
    assert_eq!(t.to_vec(), vec![9.0, 9.0, 9.0, 9.0]);
}

#[test]
fn test_reshape_of_a_transposed_view_copies_first() {
    // reshaping a non-contiguous view must not corrupt the original buffer.
    let t = Tensor::from_shape_slice(&[2, 2], &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let r = t.transpose(&[1, 0]).unwrap().reshape(&[4]).unwrap();
    r.fill(0.0);
    assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(r.to_vec(), vec![0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_reshape_rejects_length_mismatch() {
    let t = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    assert!(t.reshape(&[3, 2]).is_err());
}

#[test]
fn test_transpose_is_a_view() {
    let t = Tensor::from_shape_slice(&[2, 2], &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let tt = t.transpose(&[1, 0]).unwrap();
    assert_eq!(tt.dimensions(), &[2, 2]);
    assert_eq!(tt.to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
}

#[test]
fn test_transpose_roundtrip_restores_shape_and_strides() {
    let t = Tensor::from_shape_slice(&[2, 3, 4], &(0..24).map(|v| v as f32).collect::<Vec<_>>())
        .unwrap();
    let perm = [2, 0, 1];
    let inverse = [1, 2, 0];
    let roundtrip = t.transpose(&perm).unwrap().transpose(&inverse).unwrap();
    assert_eq!(roundtrip.dimensions(), t.dimensions());
    assert_eq!(roundtrip.strides(), t.strides());
}

#[test]
fn test_transpose_rejects_wrong_length_permutation() {
    let t = Tensor::from_shape_slice(&[2, 3], &[0.0f32; 6]).unwrap();
    assert!(t.transpose(&[0]).is_err());
}

#[test]
fn test_transpose_rejects_invalid_permutation() {
    let t = Tensor::from_shape_slice(&[2, 3], &[0.0f32; 6]).unwrap();
    assert!(t.transpose(&[0, 0]).is_err());
}

#[test]
fn test_tile_repeats_along_each_axis() {
    // np.tile([[1, 2], [3, 4]], (2, 1)) -> [[1,2],[3,4],[1,2],[3,4]]
    let t = Tensor::from_shape_slice(&[2, 2], &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let tiled = t.tile(&[2, 1]).unwrap();
    assert_eq!(tiled.dimensions(), &[4, 2]);
    assert_eq!(tiled.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_tile_repeats_along_both_axes() {
    let t = Tensor::from_shape_slice(&[1, 2], &[1.0f32, 2.0]).unwrap();
    let tiled = t.tile(&[2, 2]).unwrap();
    assert_eq!(tiled.dimensions(), &[2, 4]);
    assert_eq!(tiled.to_vec(), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
}

#[test]
fn test_tile_rejects_rep_count_mismatch() {
    let t = Tensor::from_shape_slice(&[2, 2], &[0.0f32; 4]).unwrap();
    assert!(t.tile(&[2]).is_err());
}
