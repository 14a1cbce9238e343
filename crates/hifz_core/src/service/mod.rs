//! Use-case services for view collaborators.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations views perform.
//! - Replace blocking dialogs with return-coded outcomes.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Services hold a store handle, never a cached `Database`.

pub mod evaluation_service;
pub mod report_service;
pub mod student_service;
pub mod transfer_service;
