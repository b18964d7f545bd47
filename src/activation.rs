use crate::network::NetworkItem;

/// Implement this trait to your struct to have custom activation functions.
///
/// Both functions take the pre-activation value (the weighted sum of a
/// node), never the already activated output.
pub trait Activation<T: NetworkItem> {
    fn activate(&self, x: T) -> T;
    fn derivative(&self, x: T) -> T;
}

/// Logistic sigmoid, `1 / (1 + e^-x)`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sigmoid;

impl<T> Activation<T> for Sigmoid
where
    T: NetworkItem,
{
    fn activate(&self, x: T) -> T {
        T::one() / (T::one() + (-x).exp())
    }

    fn derivative(&self, x: T) -> T {
        let y = self.activate(x);
        y * (T::one() - y)
    }
}
