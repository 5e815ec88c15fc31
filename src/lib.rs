//! # paramdef
//!
//! Host-agnostic audio-plugin parameter definitions and value model.
//!
//! This crate covers the parameter core of a plugin: a compact textual
//! definition language describing a parameter's range, scaling, default,
//! discretization and automation flags, plus the dual-representation
//! value model built from it. A parameter holds a single normalized value
//! in [0, 1] and converts bidirectionally to its plain (natural-unit)
//! scale and to display text, with an enumerated variant for parameters
//! ranging over named choices. Hosting glue, audio processing and GUI are
//! collaborators that call in through the narrow surface exposed here.
//!
//! ## Types
//!
//! - [`Parameter`] - the value model, built directly or via [`Parameter::parse`]
//! - [`ParameterKind`] - range vs. choice shape, fixed at construction
//! - [`ValueNotifier`] - injected host-notification capability
//! - [`StateNode`] - flat positional state snapshot container
//! - [`ParamError`] - construction-time validation errors
//!
//! ## Example
//!
//! ```
//! use paramdef::Parameter;
//!
//! let mut gain = Parameter::parse("name=Gain label=dB min=-60 max=12 default=0").unwrap();
//! gain.set_plain(-6.0);
//! assert!((gain.get_plain() - -6.0).abs() < 1e-4);
//!
//! let band = Parameter::parse("name=Band list=[Low, Mid, High] default=1").unwrap();
//! assert_eq!(band.normalized_to_string(0.5, 32), "Mid");
//! ```

pub mod error;
pub mod parameter;
pub mod parser;
pub mod state;

pub use error::{ParamError, ParamResult};
pub use parameter::{Parameter, ParameterKind, ValueNotifier, CONTINUOUS_NUM_STEPS};
pub use state::{load_parameter_state, save_parameter_state, StateNode};
