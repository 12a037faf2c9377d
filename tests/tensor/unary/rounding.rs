//! Tests for `ceil`, `floor`, and `round`.

use tensorwalk::Tensor;

#[test]
fn test_ceil() {
    let t = Tensor::from_slice(&[1.2f32, -1.2, 2.0]).unwrap();
    assert_eq!(t.ceil().unwrap().to_vec(), vec![2.0, -1.0, 2.0]);
}

#[test]
fn test_floor() {
    let t = Tensor::from_slice(&[1.8f32, -1.2, 2.0]).unwrap();
    assert_eq!(t.floor().unwrap().to_vec(), vec![1.0, -2.0, 2.0]);
}

#[test]
fn test_round_ties_away_from_zero() {
    let t = Tensor::from_slice(&[1.5f32, -1.5, 2.4, 2.6]).unwrap();
    assert_eq!(t.round().unwrap().to_vec(), vec![2.0, -2.0, 2.0, 3.0]);
}
