use crate::network::NetworkItem;

/// Squared error of one case, `0.5 * sum((expected - actual)^2)`.
pub fn case_error<T: NetworkItem>(actual: &[T], expected: &[T]) -> T {
    let two = T::one() + T::one();
    let mut error = T::zero();

    for (&f, &t) in actual.iter().zip(expected) {
        error += (t - f) * (t - f) / two;
    }

    error
}

/// Sum of the case errors over a whole case set.
pub fn total_error<T, A, E>(outputs: &[A], expected: &[E]) -> T
where
    T: NetworkItem,
    A: AsRef<[T]>,
    E: AsRef<[T]>,
{
    let mut total = T::zero();

    for (actual, truth) in outputs.iter().zip(expected) {
        total += case_error(actual.as_ref(), truth.as_ref());
    }

    total
}

/// Divides an epoch total by the number of cases. `cases` must be positive.
pub fn average_error<T: NetworkItem>(total: T, cases: usize) -> T {
    total / T::from(cases).unwrap_or_else(T::nan)
}
