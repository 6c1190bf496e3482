use std::cmp::Ordering;

/// argmax returns the index of the maximum value in the array x. Ties are resolved in favor of the
/// first occurrence. Returns None if x is empty.
pub fn argmax<T: std::cmp::PartialOrd + std::marker::Copy>(x: &[T]) -> Option<usize> {
    let mut iter = x.iter().enumerate();
    let (mut idx_max, &first) = iter.next()?;
    let mut val_max = first;

    for (i, &val) in iter {
        if val > val_max {
            val_max = val;
            idx_max = i;
        }
    }

    Some(idx_max)
}

/// argmin returns the index of the minimum value in the array x. Ties are resolved in favor of the
/// first occurrence. Returns None if x is empty.
pub fn argmin<T: std::cmp::PartialOrd + std::marker::Copy>(x: &[T]) -> Option<usize> {
    let mut iter = x.iter().enumerate();
    let (mut idx_min, &first) = iter.next()?;
    let mut val_min = first;

    for (i, &val) in iter {
        if val < val_min {
            val_min = val;
            idx_min = i;
        }
    }

    Some(idx_min)
}

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that would sort an array. The sort is stable, i.e. equal values
/// keep their original relative order. Incomparable values (NaN) are treated as equal.
pub fn argsort<T: std::cmp::PartialOrd>(x: &[T], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    match order {
        SortOrder::Ascending => indices.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(Ordering::Equal)),
        SortOrder::Descending => indices.sort_by(|&a, &b| x[b].partial_cmp(&x[a]).unwrap_or(Ordering::Equal)),
    }
    indices
}
