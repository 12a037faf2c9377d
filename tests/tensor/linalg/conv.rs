//! Tests for `conv2d`.

use tensorwalk::Tensor;

#[test]
fn test_conv2d_output_shape_no_padding() {
    // image [1, 1, 4, 4], kernel [1, 1, 2, 2], stride (1, 1) -> out [1, 1, 3, 3].
    let image: Vec<f32> = (0..16).map(|v| v as f32).collect();
    let img = Tensor::from_shape_slice(&[1, 1, 4, 4], &image).unwrap();
    let kernel = Tensor::from_shape_slice(&[1, 1, 2, 2], &[1.0f32, 0.0, 0.0, 0.0]).unwrap();
    let out = img.conv2d(&kernel, (1, 1)).unwrap();
    assert_eq!(out.dimensions(), &[1, 1, 3, 3]);
    // kernel picks off the top-left cell of each patch.
    assert_eq!(out.to_vec(), vec![0.0, 1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0, 10.0]);
}

#[test]
fn test_conv2d_sums_a_patch_with_all_ones_kernel() {
    // image [1, 1, 3, 3], kernel [1, 1, 2, 2] of ones, stride (1, 1) -> out [1, 1, 2, 2].
    let image: Vec<f32> = (0..9).map(|v| v as f32).collect();
    let img = Tensor::from_shape_slice(&[1, 1, 3, 3], &image).unwrap();
    let kernel = Tensor::from_shape_slice(&[1, 1, 2, 2], &[1.0f32; 4]).unwrap();
    let out = img.conv2d(&kernel, (1, 1)).unwrap();
    assert_eq!(out.dimensions(), &[1, 1, 2, 2]);
    // patches: [0,1,3,4]->8, [1,2,4,5]->12, [3,4,6,7]->20, [4,5,7,8]->24
    assert_eq!(out.to_vec(), vec![8.0, 12.0, 20.0, 24.0]);
}

#[test]
fn test_conv2d_respects_stride() {
    let image: Vec<f32> = (0..16).map(|v| v as f32).collect();
    let img = Tensor::from_shape_slice(&[1, 1, 4, 4], &image).unwrap();
    let kernel = Tensor::from_shape_slice(&[1, 1, 2, 2], &[1.0f32, 0.0, 0.0, 0.0]).unwrap();
    let out = img.conv2d(&kernel, (2, 2)).unwrap();
    assert_eq!(out.dimensions(), &[1, 1, 2, 2]);
    assert_eq!(out.to_vec(), vec![0.0, 2.0, 8.0, 10.0]);
}

#[test]
fn test_conv2d_with_multiple_output_channels_and_batch() {
    let image: Vec<f32> = (0..2 * 1 * 3 * 3).map(|v| v as f32).collect();
    let img = Tensor::from_shape_slice(&[2, 1, 3, 3], &image).unwrap();
    // two output channels: one picks top-left, the other sums the patch.
    let kernel = Tensor::from_shape_slice(
        &[2, 1, 2, 2],
        &[1.0f32, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
    )
    .unwrap();
    let out = img.conv2d(&kernel, (1, 1)).unwrap();
    assert_eq!(out.dimensions(), &[2, 2, 2, 2]);
}

#[test]
fn test_conv2d_rejects_channel_mismatch() {
    let img = Tensor::from_shape_slice(&[1, 3, 4, 4], &[0.0f32; 48]).unwrap();
    let kernel = Tensor::from_shape_slice(&[1, 2, 2, 2], &[0.0f32; 8]).unwrap();
    assert!(img.conv2d(&kernel, (1, 1)).is_err());
}

#[test]
fn test_conv2d_rejects_non_rank_4_image() {
    let img = Tensor::from_shape_slice(&[4, 4], &[0.0f32; 16]).unwrap();
    let kernel = Tensor::from_shape_slice(&[1, 1, 2, 2], &[0.0f32; 4]).unwrap();
    assert!(img.conv2d(&kernel, (1, 1)).is_err());
}
