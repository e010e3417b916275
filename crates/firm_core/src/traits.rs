/// A profit curve over output quantity `q`.
///
/// The root search in [`crate::markers`] only needs profit and its
/// derivative, so it is written against this trait rather than against the
/// concrete cost model.
pub trait ProfitFunction {
    /// Total profit at quantity `q`.
    fn profit(&self, q: f64) -> f64;

    /// Derivative of [`ProfitFunction::profit`] with respect to `q`.
    fn marginal_profit(&self, q: f64) -> f64;
}
