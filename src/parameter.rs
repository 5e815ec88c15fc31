//! The parameter value model.
//!
//! A [`Parameter`] stores exactly one mutable scalar: its current value in
//! normalized form (0.0 to 1.0). Everything else — range, choice labels,
//! default, flags — is fixed at construction. Conversions map the
//! normalized value to and from the parameter's plain (natural-unit)
//! scale and to and from display text.
//!
//! Parameters come in two shapes, made explicit by [`ParameterKind`]:
//!
//! - **Range**: a free-form `minimum..maximum` span, continuous or
//!   quantized into steps. `minimum > maximum` is allowed and flips the
//!   orientation.
//! - **Choice**: a list of named elements addressed by index; the range
//!   is implicitly `0..len-1` with one step per element.
//!
//! Construction happens either directly ([`Parameter::ranged`],
//! [`Parameter::choice`]) or through the definition-string factory
//! ([`Parameter::parse`]) built on the [`parser`](crate::parser) module.
//!
//! # Thread safety
//!
//! There is no internal synchronization: the value is a plain `f32` and
//! every conversion is pure arithmetic, safe to call from a real-time
//! audio thread. Serializing concurrent access from host, UI and audio
//! threads is the embedding framework's job.

use crate::error::{ParamError, ParamResult};
use crate::parser;

/// Step count reported to hosts for continuous parameters.
///
/// Hosts conventionally treat `i32::MAX` steps as "effectively
/// continuous" for automation-lane resolution.
pub const CONTINUOUS_NUM_STEPS: i32 = 0x7fff_ffff;

/// Receives normalized value changes that must be forwarded to the host.
///
/// Injected into [`Parameter::set_plain_notifying`] so the value model
/// stays testable without a live host. The embedding framework typically
/// implements this by posting a begin/change/end gesture to the host's
/// automation system.
pub trait ValueNotifier {
    /// Called with the new normalized value, before any step quantization.
    fn value_changed(&self, normalized: f32);
}

/// The immutable shape of a parameter, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    /// Free-form range, optionally quantized.
    Range {
        /// Plain-scale value at normalized 0.0.
        minimum: f32,
        /// Plain-scale value at normalized 1.0. May be below `minimum`
        /// (inverted orientation).
        maximum: f32,
        /// Number of discrete steps; 0 means continuous.
        step_count: i32,
    },
    /// Discrete set of named choices, addressed by index.
    Choice {
        /// Display labels, one per choice.
        elements: Vec<String>,
    },
}

impl ParameterKind {
    fn minimum(&self) -> f32 {
        match self {
            Self::Range { minimum, .. } => *minimum,
            Self::Choice { .. } => 0.0,
        }
    }

    fn maximum(&self) -> f32 {
        match self {
            Self::Range { maximum, .. } => *maximum,
            Self::Choice { elements } => (elements.len() - 1) as f32,
        }
    }

    fn step_count(&self) -> i32 {
        match self {
            Self::Range { step_count, .. } => *step_count,
            Self::Choice { elements } => elements.len() as i32,
        }
    }
}

/// A single automatable plugin parameter.
///
/// The only mutable field is the normalized value; see the
/// [module docs](self) for the overall model.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    label: String,
    kind: ParameterKind,
    /// Default in plain scale (a choice index for [`ParameterKind::Choice`]).
    default: f32,
    automatable: bool,
    meta: bool,
    /// Current value, normalized. Out-of-range values may appear
    /// transiently when a host writes past [0,1]; lookups clamp.
    value: f32,
}

impl Parameter {
    /// Create a range parameter.
    ///
    /// `step_count` of 0 means continuous. `minimum > maximum` is allowed
    /// and signifies an inverted orientation.
    ///
    /// # Errors
    ///
    /// [`ParamError::DegenerateRange`] when `minimum == maximum`: the
    /// plain-to-normalized conversion would divide by zero.
    pub fn ranged(
        name: impl Into<String>,
        label: impl Into<String>,
        minimum: f32,
        maximum: f32,
        default: f32,
        step_count: i32,
    ) -> ParamResult<Self> {
        if minimum == maximum {
            return Err(ParamError::DegenerateRange { endpoint: minimum });
        }
        Ok(Self::build(
            name.into(),
            label.into(),
            ParameterKind::Range {
                minimum,
                maximum,
                step_count,
            },
            default,
        ))
    }

    /// Create a choice parameter over `elements`, defaulting to the
    /// element at `default_index`.
    ///
    /// # Errors
    ///
    /// - [`ParamError::NotEnoughChoices`] for fewer than two elements
    ///   (one element collapses the range to a point).
    /// - [`ParamError::DefaultOutOfRange`] when `default_index` does not
    ///   address an element.
    pub fn choice(
        name: impl Into<String>,
        label: impl Into<String>,
        elements: Vec<String>,
        default_index: usize,
    ) -> ParamResult<Self> {
        if elements.len() < 2 {
            return Err(ParamError::NotEnoughChoices {
                count: elements.len(),
            });
        }
        if default_index >= elements.len() {
            return Err(ParamError::DefaultOutOfRange {
                index: default_index,
                count: elements.len(),
            });
        }
        Ok(Self::build(
            name.into(),
            label.into(),
            ParameterKind::Choice { elements },
            default_index as f32,
        ))
    }

    fn build(name: String, label: String, kind: ParameterKind, default: f32) -> Self {
        let mut parameter = Self {
            name,
            label,
            kind,
            default,
            automatable: true,
            meta: false,
            value: 0.0,
        };
        parameter.value = parameter.default_normalized();
        parameter
    }

    /// Set whether the host may automate this parameter (default true).
    pub fn with_automatable(mut self, automatable: bool) -> Self {
        self.automatable = automatable;
        self
    }

    /// Mark this parameter as a meta parameter (default false).
    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// Build a parameter from a definition string.
    ///
    /// Recognized options: `name`, `label`, `min`, `max`, `default`,
    /// `nsteps`, `auto`, `meta`, `list`. A `list` option selects the
    /// choice variant (with `default` read as an element index); otherwise
    /// the range variant is built with fallbacks `min=0`, `max=1`,
    /// `default=min`, `nsteps=0`, `auto=true`, `meta=false`.
    ///
    /// The `label` option is only honored when a `min` option is also
    /// present. This is a long-standing quirk of the definition grammar
    /// that existing patch definitions rely on; it is kept for
    /// compatibility.
    ///
    /// # Errors
    ///
    /// Same as [`Parameter::ranged`] / [`Parameter::choice`] for the
    /// resolved option values.
    pub fn parse(definition: &str) -> ParamResult<Self> {
        let options = parser::parse_options(definition);
        let name = options
            .get("name")
            .map(|tokens| parser::as_string(tokens))
            .unwrap_or_default();
        let label = if options.contains_key("min") {
            options
                .get("label")
                .map(|tokens| parser::as_string(tokens))
                .unwrap_or_default()
        } else {
            String::new()
        };

        let parameter = if let Some(list) = options.get("list") {
            let elements = parser::as_list(list);
            let default = options
                .get("default")
                .map(|tokens| parser::as_float(tokens))
                .unwrap_or(0.0) as usize;
            Self::choice(name, label, elements, default)
        } else {
            let minimum = options
                .get("min")
                .map(|tokens| parser::as_float(tokens))
                .unwrap_or(0.0);
            let maximum = options
                .get("max")
                .map(|tokens| parser::as_float(tokens))
                .unwrap_or(1.0);
            let default = options
                .get("default")
                .map(|tokens| parser::as_float(tokens))
                .unwrap_or(minimum);
            let step_count = options
                .get("nsteps")
                .map(|tokens| parser::as_integer(tokens))
                .unwrap_or(0);
            Self::ranged(name, label, minimum, maximum, default, step_count)
        }?;

        let automatable = options
            .get("auto")
            .map(|tokens| parser::as_bool(tokens))
            .unwrap_or(true);
        let meta = options
            .get("meta")
            .map(|tokens| parser::as_bool(tokens))
            .unwrap_or(false);

        log::debug!(
            "parsed parameter definition: name={:?} kind={:?}",
            parameter.name,
            parameter.kind
        );
        Ok(parameter.with_automatable(automatable).with_meta(meta))
    }

    /// Display name, truncated to at most `max_len` characters for hosts
    /// with fixed-width name fields.
    pub fn name(&self, max_len: usize) -> String {
        self.name.chars().take(max_len).collect()
    }

    /// Unit label (e.g. "dB", "Hz").
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The immutable shape of this parameter.
    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    /// Current value, normalized (0.0 to 1.0).
    pub fn get_normalized(&self) -> f32 {
        self.value
    }

    /// Set the normalized value.
    ///
    /// Discrete parameters snap to `round(v * maximum) / maximum`. The
    /// quantization grid is tied to the range width, not the step count;
    /// for choice parameters `maximum == len-1`, so this snaps to element
    /// indices. Continuous parameters store `v` unclamped.
    pub fn set_normalized(&mut self, value: f32) {
        if self.is_discrete() {
            let maximum = self.kind.maximum();
            self.value = (value * maximum).round() / maximum;
        } else {
            self.value = value;
        }
    }

    /// Current value on the plain scale: `value * (max - min) + min`.
    ///
    /// With an inverted range (`minimum > maximum`) the mapping naturally
    /// runs downhill.
    pub fn get_plain(&self) -> f32 {
        self.value * (self.kind.maximum() - self.kind.minimum()) + self.kind.minimum()
    }

    /// Set the value from the plain scale: `value = (v - min) / (max - min)`.
    ///
    /// Safe by construction; degenerate ranges are rejected when the
    /// parameter is built.
    pub fn set_plain(&mut self, plain: f32) {
        self.value = (plain - self.kind.minimum()) / (self.kind.maximum() - self.kind.minimum());
    }

    /// Set the value from the plain scale and notify the host.
    ///
    /// Applies the value through [`set_normalized`](Self::set_normalized)
    /// and hands the (pre-quantization) normalized value to `notifier`.
    pub fn set_plain_notifying(&mut self, plain: f32, notifier: &dyn ValueNotifier) {
        let normalized =
            (plain - self.kind.minimum()) / (self.kind.maximum() - self.kind.minimum());
        self.set_normalized(normalized);
        notifier.value_changed(normalized);
    }

    /// The construction-time default in normalized form.
    pub fn default_normalized(&self) -> f32 {
        (self.default - self.kind.minimum()) / (self.kind.maximum() - self.kind.minimum())
    }

    /// Whether the parameter is quantized into a finite number of steps.
    pub fn is_discrete(&self) -> bool {
        let step_count = self.kind.step_count();
        step_count > 0 && (step_count as f64) < 1e37
    }

    /// Step count reported to the host; [`CONTINUOUS_NUM_STEPS`] for
    /// continuous parameters.
    pub fn num_steps(&self) -> i32 {
        if self.is_discrete() {
            self.kind.step_count()
        } else {
            CONTINUOUS_NUM_STEPS
        }
    }

    /// True when `minimum > maximum`.
    pub fn is_orientation_inverted(&self) -> bool {
        self.kind.minimum() > self.kind.maximum()
    }

    /// Whether the host may automate this parameter.
    pub fn is_automatable(&self) -> bool {
        self.automatable
    }

    /// Whether the host should treat this as a meta parameter.
    pub fn is_meta_parameter(&self) -> bool {
        self.meta
    }

    /// Display text for a normalized value, truncated to `max_len`
    /// characters.
    ///
    /// Range parameters format the plain-scale value. Choice parameters
    /// clamp the value to [0,1] and pick an element index with a
    /// parity-dependent rounding rule: `floor(value * maximum)` when the
    /// integral `maximum` is odd, `ceil(value * maximum)` when it is
    /// even. The rule is a compatibility contract relied on by existing
    /// hosts and patches; both branches land on exact indices at the
    /// `i / (len-1)` grid points.
    pub fn normalized_to_string(&self, value: f32, max_len: usize) -> String {
        match &self.kind {
            ParameterKind::Range { minimum, maximum, .. } => {
                let plain = value * (*maximum - *minimum) + *minimum;
                format!("{}", plain).chars().take(max_len).collect()
            }
            ParameterKind::Choice { elements } => {
                let value = value.clamp(0.0, 1.0);
                let maximum = self.kind.maximum();
                let index = if (maximum as i32) % 2 != 0 {
                    (value * maximum).floor() as usize
                } else {
                    (value * maximum).ceil() as usize
                };
                // The formula stays in range for clamped input; the min is
                // a guard against host programming errors.
                let index = index.min(elements.len() - 1);
                elements[index].chars().take(max_len).collect()
            }
        }
    }

    /// Normalized value for display text.
    ///
    /// Range parameters parse `text` directly as a normalized float
    /// (fallback 0.0) — deliberately not the inverse of
    /// [`normalized_to_string`](Self::normalized_to_string), which formats
    /// the plain scale. Choice parameters return `index / maximum` for a
    /// matching element and a negative sentinel (`-1 / maximum`) for an
    /// unknown label; callers must reject negative results.
    pub fn string_to_normalized(&self, text: &str) -> f32 {
        match &self.kind {
            ParameterKind::Range { .. } => text.trim().parse().unwrap_or(0.0),
            ParameterKind::Choice { elements } => {
                let index = match elements.iter().position(|element| element == text) {
                    Some(index) => index as f32,
                    None => {
                        log::warn!(
                            "unknown choice label {:?} for parameter {:?}",
                            text,
                            self.name
                        );
                        -1.0
                    }
                };
                index / self.kind.maximum()
            }
        }
    }
}
