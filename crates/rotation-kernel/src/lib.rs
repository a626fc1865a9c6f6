//! Rotation Kernel: fair, seed-reproducible assignment of candidates to time slots.
//!
//! A generation pass walks an ordered schedule of fixed-width slots and fills
//! each one with either a single candidate or a mixed pair of candidates.
//!
//! ## Guarantees
//!
//! - **Deterministic**: equal seed, candidates, time range and options produce
//!   identical tables, on any platform.
//! - **Bounded unfairness**: a candidate (or pair) is only eligible while its
//!   usage count sits near the low end of the current spread.
//! - **No back-to-back repeats**: a slot never reuses a candidate from the
//!   previous slot, unless the retry budget ran out (flagged on the entry).
//!
//! ```
//! use rotation_kernel::{generate, GenerationConfig};
//!
//! let config = GenerationConfig {
//!     seed: 42,
//!     candidates: vec!["Ann".into(), "Bob".into(), "Cid".into(), "Dee".into()],
//!     ..Default::default()
//! };
//! let table = generate(&config).unwrap();
//! assert_eq!(table.len(), 12);
//! ```

pub mod config;
pub mod error;
pub mod fairness;
pub mod generator;
pub mod pipeline;
pub mod rng;
pub mod slots;

pub use config::{normalize_candidates, GenerationConfig, TimeOfDay};
pub use error::{ConfigError, ConfigResult};
pub use fairness::{FairnessTracker, Pick};
pub use generator::{Assignment, AssignmentGenerator, MAX_ATTEMPTS, MIN_POOL_SIZE};
pub use pipeline::{generate, Entry, Table, TERMINAL_MARKER};
pub use rng::SplitMix32;
pub use slots::{build_slots, Slot};
