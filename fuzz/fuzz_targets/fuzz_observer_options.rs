//! Fuzz target for observer option resolution.
//!
//! Resolution must reject malformed options with errors, never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mo_config::{FixedConfig, HmmConfig, Options, OptionValue, VolatilityConfig};

#[derive(Arbitrary, Debug)]
struct RawOptions {
    decay: Option<f64>,
    window: Option<u64>,
    prior_weight: Option<f64>,
    p_c: Option<f64>,
    resol: Option<u64>,
    grid_nu: Option<Vec<f64>>,
    prior_nu: Option<Vec<f64>>,
}

fuzz_target!(|raw: RawOptions| {
    let mut options = Options::new();
    if let Some(v) = raw.decay {
        options.set("decay", OptionValue::Scalar(v));
    }
    if let Some(v) = raw.window {
        options.set("window", OptionValue::Integer(v));
    }
    if let Some(v) = raw.prior_weight {
        options.set("prior_weight", OptionValue::Scalar(v));
    }
    if let Some(v) = raw.p_c {
        options.set("p_c", OptionValue::Scalar(v));
    }
    if let Some(v) = raw.resol {
        options.set("resol", OptionValue::Integer(v));
    }
    if let Some(v) = raw.grid_nu {
        options.set("grid_nu", OptionValue::Grid(v));
    }
    if let Some(v) = raw.prior_nu {
        options.set("prior_nu", OptionValue::Grid(v));
    }

    let _ = FixedConfig::resolve(&options, 1, 2);
    let _ = HmmConfig::resolve(&options);
    let _ = VolatilityConfig::resolve(&options);
});
