pub trait Zero {
    /// Checks if the value is zero.
    fn is_zero(&self) -> bool;
}
