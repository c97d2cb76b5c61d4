//! Utilities

// Modules
pub mod logger;

// Imports
use std::{cell::RefCell, fmt};

/// Extension trait for `f64` to divide only by non-zero values
#[extend::ext(name = NonZeroDiv)]
pub impl f64 {
	/// Divides `self` by `rhs`.
	///
	/// Returns `None` if `rhs` is zero, instead of an infinity or `NaN`.
	fn div_nonzero(self, rhs: f64) -> Option<f64> {
		match rhs == 0.0 {
			true => None,
			false => Some(self / rhs),
		}
	}
}

/// [`fmt::Display`] helper to display using a `FnMut(&mut fmt::Formatter)`
pub struct DisplayWrapper<F: FnMut(&mut fmt::Formatter) -> fmt::Result>(RefCell<F>);

impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> DisplayWrapper<F> {
	/// Creates a new display wrapper
	#[must_use]
	pub const fn new(func: F) -> Self {
		Self(RefCell::new(func))
	}
}


impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> fmt::Display for DisplayWrapper<F> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Note: `f` cannot be re-entrant, so this cannot fail
		self.0.borrow_mut()(f)
	}
}

/// Displays an optional value, using `n/a` for `None`.
///
/// The value is formatted with `precision` decimal places.
pub fn display_opt(value: Option<f64>, precision: usize) -> impl fmt::Display {
	DisplayWrapper::new(move |f| match value {
		Some(value) => f.pad(&format!("{value:.precision$}")),
		None => f.pad("n/a"),
	})
}
