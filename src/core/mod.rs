//! Core reconciliation engine for cell update batches

pub mod reconciler;

pub use reconciler::CellReconciler;
