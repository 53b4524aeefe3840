//! Fee estimation for single-transaction inscriptions.
//!
//! Sizes are counted in weight units. Inputs and outputs use fixed P2WPKH and
//! segwit output sizes, while the envelope is counted as witness data at one
//! weight unit per byte.

use bitcoin::{Amount, FeeRate, Weight};
use ordkit_envelope_fmt::EnvelopeScript;

/// Version, locktime and the input/output counts, in vbytes.
pub const TX_OVERHEAD_VBYTES: u64 = 10;

/// Segwit marker and flag, in weight units.
pub const SEGWIT_MARKER_WEIGHT: u64 = 2;

/// A P2WPKH input including its witness, in vbytes.
pub const INPUT_VBYTES: u64 = 68;

/// A segwit v0/v1 output, in vbytes.
pub const OUTPUT_VBYTES: u64 = 43;

/// Estimates fees for transactions carrying an envelope of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeEstimator {
    envelope_len: u64,
}

impl FeeEstimator {
    /// Constructs an estimator for an envelope of `envelope_len` bytes.
    pub fn new(envelope_len: usize) -> Self {
        Self {
            envelope_len: envelope_len as u64,
        }
    }

    /// Constructs an estimator sized for `envelope`.
    pub fn for_envelope(envelope: &EnvelopeScript) -> Self {
        Self::new(envelope.len())
    }

    /// Envelope length this estimator accounts for.
    pub fn envelope_len(&self) -> u64 {
        self.envelope_len
    }

    /// Estimated weight of a transaction with the given shape.
    pub fn weight(&self, num_inputs: usize, num_outputs: usize) -> Weight {
        let wu = (TX_OVERHEAD_VBYTES * 4)
            .saturating_add(SEGWIT_MARKER_WEIGHT)
            .saturating_add((num_inputs as u64).saturating_mul(INPUT_VBYTES * 4))
            .saturating_add((num_outputs as u64).saturating_mul(OUTPUT_VBYTES * 4))
            .saturating_add(self.envelope_len);
        Weight::from_wu(wu)
    }

    /// Estimated virtual size, rounded up.
    pub fn vsize(&self, num_inputs: usize, num_outputs: usize) -> u64 {
        self.weight(num_inputs, num_outputs).to_wu().div_ceil(4)
    }

    /// Estimated fee, rounded up to the next satoshi.
    pub fn estimate(&self, num_inputs: usize, num_outputs: usize, fee_rate: FeeRate) -> Amount {
        let vsize = u128::from(self.vsize(num_inputs, num_outputs));
        let sats = (vsize * 4)
            .saturating_mul(u128::from(fee_rate.to_sat_per_kwu()))
            .div_ceil(1000);
        Amount::from_sat(u64::try_from(sats).unwrap_or(u64::MAX))
    }
}

/// Converts a sat/vB rate into a [`FeeRate`], rounding up to whole sat/kwu.
///
/// Returns `None` unless the rate is finite and positive.
pub fn fee_rate_from_sat_per_vb(sat_per_vb: f64) -> Option<FeeRate> {
    if !sat_per_vb.is_finite() || sat_per_vb <= 0.0 {
        return None;
    }
    let kwu = (sat_per_vb * 250.0).ceil();
    if kwu >= u64::MAX as f64 {
        return None;
    }
    Some(FeeRate::from_sat_per_kwu(kwu as u64))
}
