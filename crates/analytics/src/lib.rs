//! `peopleops-analytics` — KPIs derived by replaying the event log.
//!
//! Every figure here is recomputed from a full replay on each request. There
//! is deliberately no incremental counter anywhere: KPI values must stay
//! fully reconstructible from the log alone.

pub mod kpis;

pub use kpis::{AccuracyMetrics, AnalyticsService, AutomationMetrics, Kpis, UsageMetrics};
