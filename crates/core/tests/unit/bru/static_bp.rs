//! Static Predictor Tests.

use bpsim_core::bru::static_bp::StaticPredictor;
use bpsim_core::{BranchPredictor, Outcome};

use crate::common::{cond, replay};

/// Static predictor always predicts taken.
#[test]
fn static_always_taken() {
    let bp = StaticPredictor::new();
    assert_eq!(bp.predict(0x1000), Outcome::Taken);
    assert_eq!(bp.predict(0), Outcome::Taken);
    assert_eq!(bp.storage_bits(), 0);
}

/// Static predictor stays taken after not-taken training.
#[test]
fn static_ignores_training() {
    let mut bp = StaticPredictor::new();
    let records = vec![cond(0x1000, Outcome::NotTaken); 50];
    assert_eq!(replay(&mut bp, &records), 50);
    assert_eq!(bp.predict(0x1000), Outcome::Taken);
}
