//! Injectable source of uniform random draws.
//!
//! Selection never reaches for an ambient generator. Callers pass a
//! `RandomSource` so deployments can choose an entropy-seeded, seeded or
//! scripted sequence.

/// Produce uniform values in `[0.0, 1.0)`.
///
/// Implementations must never return a value outside that interval;
/// consumers treat such a value as a contract violation and fail fast.
///
/// # Examples
///
/// ```rust
/// use keepmedia_core::RandomSource;
///
/// struct Midpoint;
///
/// impl RandomSource for Midpoint {
///     fn next_unit(&mut self) -> f64 {
///         0.5
///     }
/// }
///
/// let mut source = Midpoint;
/// assert_eq!(source.next_unit(), 0.5);
/// ```
pub trait RandomSource {
    /// Return the next uniform draw.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
