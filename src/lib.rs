//! # react-mc: symbolic checking of reactivity properties
//!
//! **`react-mc`** decides whether every execution of a finite-state system
//! satisfies a *reactivity* property
//!
//! ```text
//! G F f -> G F g      (if f holds infinitely often, so does g)
//! ```
//!
//! and, when it does not, produces a lasso-shaped counterexample: a finite
//! prefix from an initial state followed by a loop that visits `f` and never
//! visits `g`.
//!
//! Systems are written in a boolean subset of the SMV language and encoded with
//! the BDD manager in [`bdd`]. The algorithms only see the abstract interfaces of
//! [`system`], so they work with any other symbolic or explicit backend as well.
//!
//! ## Basic Usage
//!
//! ```rust
//! use react_mc::check::{check_all, PropertyOutcome, VerificationResult};
//! use react_mc::config::CheckerConfig;
//! use react_mc::model::SymbolicModel;
//!
//! let source = "
//!     MODULE main
//!     VAR x : boolean;
//!     ASSIGN init(x) := FALSE; next(x) := TRUE;
//!     LTLSPEC G F x -> G F !x
//! ";
//! let (system, properties) = SymbolicModel::from_source(source, 16)?;
//! let reports = check_all(&system, &properties, &CheckerConfig::default());
//!
//! // x stays TRUE forever after the first step.
//! assert!(matches!(
//!     reports[0].outcome,
//!     PropertyOutcome::Checked(VerificationResult::Violated(_))
//! ));
//! # Ok::<(), react_mc::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`classify`]**: recognizes `G F f -> G F g` in a formula tree.
//! - **[`reach`]**: forward reachability.
//! - **[`cycle`]**: the nested fixpoint searching for a bad cycle.
//! - **[`counterexample`]**: lasso reconstruction.
//! - **[`check`]**: per-property orchestration and reports.

pub mod bdd;
pub mod cache;
pub mod check;
pub mod classify;
pub mod config;
pub mod counterexample;
pub mod cycle;
pub mod error;
pub mod formula;
pub mod model;
pub mod parser;
pub mod reach;
pub mod reference;
pub mod sat;
pub mod system;
pub mod table;
pub mod types;
pub mod utils;
