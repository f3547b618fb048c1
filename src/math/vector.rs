/// `a += b`, elementwise.
pub fn add_assign(a: &mut [f64], b: &[f64]) {
    assert_eq!(a.len(), b.len(), "Vectors are of incorrect sizes");
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
}

/// `a -= scale * b`, elementwise.
pub fn sub_scaled(a: &mut [f64], b: &[f64], scale: f64) {
    assert_eq!(a.len(), b.len(), "Vectors are of incorrect sizes");
    for (x, y) in a.iter_mut().zip(b) {
        *x -= scale * y;
    }
}

pub fn is_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Index of the maximum element in a slice. Ties go to the lowest index.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if x <= b => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
