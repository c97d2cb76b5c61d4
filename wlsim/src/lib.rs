//! Start-Gap wear-leveling experiment harness (`wlsim`)
//!
//! Generates memory access traces for a non-volatile memory simulator and
//! analyzes the wear-leveling reports it produces.

// Modules
pub mod address_space;
pub mod compare;
pub mod metrics;
pub mod report;
pub mod trace;

// Exports
pub use self::{
	address_space::AddressSpace,
	compare::Comparison,
	metrics::{DerivedMetrics, MetricsConfig},
	report::{ParsedStats, ReportParser},
	trace::{DistributionPolicy, TraceGenerator, TraceWriter},
};
