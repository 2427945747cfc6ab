//! Fuzz target for the fixed-observer pipeline.
//!
//! Feeds arbitrary symbol streams (including pause sentinels) through the
//! full count/posterior/metrics path and checks the surprise invariant.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mo_config::Options;
use mo_core::{ideal_observer, Engines, ObserverKind};

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let order = (first % 3) as usize;
    // Three regular symbols plus the pause sentinel (value 3)
    let seq: Vec<usize> = rest.iter().take(512).map(|&b| (b % 4) as usize).collect();

    let result = ideal_observer(
        &seq,
        ObserverKind::Fixed,
        order,
        Some(3),
        &Options::new(),
        &Engines::new(),
    );

    if let Ok(out) = result {
        for s in out.surprise.iter().flatten() {
            assert!(*s >= 0.0, "surprise must never be negative: {s}");
        }
        if let Some(diag) = &out.diagnostics {
            assert!(diag.bayesian[0].is_none());
        }
    }
});
