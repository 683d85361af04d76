//! Resolved parameter types
//!
//! The tracing state is a tagged union so that a selector-0 invocation can
//! never carry range bounds and a range trigger can never lack them.

use std::fmt;

/// Literal token enabling tracing
pub const TRACING_ENABLED_TOKEN: &str = "yes";

/// Literal token disabling tracing
pub const TRACING_DISABLED_TOKEN: &str = "no";

/// The `<yes|no>` tracing argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TracingFlag {
    /// `yes`
    Enabled,
    /// `no`
    Disabled,
}

impl TracingFlag {
    /// Parse the exact, case-sensitive token
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            TRACING_ENABLED_TOKEN => Some(Self::Enabled),
            TRACING_DISABLED_TOKEN => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Token written back to the runtime document
    #[inline]
    #[must_use]
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Enabled => TRACING_ENABLED_TOKEN,
            Self::Disabled => TRACING_DISABLED_TOKEN,
        }
    }
}

/// Trace output format, `0..=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// 0: human readable text
    HumanReadable,
    /// 1: binary
    Binary,
    /// 2: flame graph
    Flamegraph,
}

impl OutputFormat {
    /// Map a numeric argument onto a format
    #[must_use]
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Self::HumanReadable),
            1 => Some(Self::Binary),
            2 => Some(Self::Flamegraph),
            _ => None,
        }
    }

    /// Numeric value stored in the runtime document
    #[inline]
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::HumanReadable => 0,
            Self::Binary => 1,
            Self::Flamegraph => 2,
        }
    }
}

/// Trace trigger selector, `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSelector {
    /// 0: trace unconditionally
    Always,
    /// 1..=3: trace inside a start/end window
    Range(RangeTrigger),
}

impl TriggerSelector {
    /// Map a numeric argument onto a selector
    #[must_use]
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Self::Always),
            1 => Some(Self::Range(RangeTrigger::Cycle)),
            2 => Some(Self::Range(RangeTrigger::ProgramCounter)),
            3 => Some(Self::Range(RangeTrigger::Instruction)),
            _ => None,
        }
    }

    /// Numeric value stored in the runtime document
    #[inline]
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Always => 0,
            Self::Range(trigger) => trigger.index(),
        }
    }
}

/// Selectors that open a start/end window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeTrigger {
    /// 1: cycle count window, decimal bounds
    Cycle,
    /// 2: program counter window, hexadecimal bounds
    ProgramCounter,
    /// 3: instruction window, hexadecimal bounds
    Instruction,
}

impl RangeTrigger {
    /// Numeric selector value
    #[inline]
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Cycle => 1,
            Self::ProgramCounter => 2,
            Self::Instruction => 3,
        }
    }

    /// Whether bounds are hexadecimal digit strings
    #[inline]
    #[must_use]
    pub fn uses_hex_bounds(self) -> bool {
        !matches!(self, Self::Cycle)
    }
}

impl fmt::Display for RangeTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cycle => "cycle",
            Self::ProgramCounter => "program counter",
            Self::Instruction => "instruction",
        };
        write!(f, "{name} trigger ({})", self.index())
    }
}

/// A resolved start or end bound
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeBound {
    /// Written as an integer
    Decimal(u64),
    /// Written as the hex digit string, verbatim
    HexDigits(String),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(value) => write!(f, "{value}"),
            Self::HexDigits(digits) => f.write_str(digits),
        }
    }
}

/// Tracing fields to write, by gate outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracingPlan {
    /// Tracing disabled; no tracing field beyond the flag is touched
    NoTracing,

    /// Tracing enabled with selector 0; no window bounds
    TracingOnly {
        /// Output format
        format: OutputFormat,
    },

    /// Tracing enabled with a windowed trigger
    TracingWithRange {
        /// Output format
        format: OutputFormat,
        /// Window trigger kind
        selector: RangeTrigger,
        /// Window start
        start: RangeBound,
        /// Window end
        end: RangeBound,
    },
}

impl TracingPlan {
    /// Tracing flag implied by the plan
    #[inline]
    #[must_use]
    pub fn flag(&self) -> TracingFlag {
        match self {
            Self::NoTracing => TracingFlag::Disabled,
            Self::TracingOnly { .. } | Self::TracingWithRange { .. } => TracingFlag::Enabled,
        }
    }

    /// Output format, when tracing is enabled
    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self {
            Self::NoTracing => None,
            Self::TracingOnly { format } | Self::TracingWithRange { format, .. } => Some(*format),
        }
    }

    /// Trigger selector, when tracing is enabled
    #[must_use]
    pub fn trigger_selector(&self) -> Option<TriggerSelector> {
        match self {
            Self::NoTracing => None,
            Self::TracingOnly { .. } => Some(TriggerSelector::Always),
            Self::TracingWithRange { selector, .. } => Some(TriggerSelector::Range(*selector)),
        }
    }
}

/// Output of resolution; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameters {
    /// Hardware configuration name
    pub hardware_id: String,
    /// Workload descriptor file name
    pub workload_id: String,
    /// Instrumentation sample rate, 0 when not given
    pub sample_rate: u64,
    /// Tracing fields
    pub tracing: TracingPlan,
}

impl ResolvedParameters {
    /// Whether tracing is enabled
    #[inline]
    #[must_use]
    pub fn tracing_enabled(&self) -> bool {
        self.tracing.flag() == TracingFlag::Enabled
    }
}
