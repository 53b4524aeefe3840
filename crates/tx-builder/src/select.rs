//! Largest-first UTXO selection.
//!
//! The fee depends on the number of inputs, which depends on the fee, so the
//! selector iterates on the assumed input count until the chosen prefix no
//! longer grows.

use bitcoin::{Address, Amount, FeeRate};
use tracing::*;

use crate::error::{SelectError, SelectResult};
use crate::fee::FeeEstimator;
use crate::utxo::{Utxo, UtxoSource};

/// Default bound on fixed-point rounds.
pub const DEFAULT_MAX_SELECTION_ROUNDS: usize = 16;

/// Outputs assumed when pricing a funding selection: inscription plus change.
pub const FUNDING_OUTPUT_COUNT: usize = 2;

/// Outcome of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    chosen: Vec<Utxo>,
    fee: Amount,
    change: Amount,
}

impl Selection {
    /// Chosen UTXOs, largest first.
    pub fn chosen(&self) -> &[Utxo] {
        &self.chosen
    }

    /// Fee for the chosen inputs and [`FUNDING_OUTPUT_COUNT`] outputs.
    pub fn fee(&self) -> Amount {
        self.fee
    }

    /// Value left over after the required value and fee.
    pub fn change(&self) -> Amount {
        self.change
    }

    /// Sum of the chosen UTXOs.
    pub fn total_value(&self) -> Amount {
        self.chosen.iter().map(|u| u.value).sum()
    }

    /// Consumes the selection, returning the chosen UTXOs.
    pub fn into_chosen(self) -> Vec<Utxo> {
        self.chosen
    }
}

/// Selects funding UTXOs for an address from a [`UtxoSource`].
#[derive(Debug, Clone)]
pub struct UtxoSelector<S> {
    source: S,
    estimator: FeeEstimator,
    confirmed_only: bool,
    max_rounds: usize,
}

impl<S: UtxoSource> UtxoSelector<S> {
    /// Constructs a selector that prices transactions with `estimator`.
    pub fn new(source: S, estimator: FeeEstimator) -> Self {
        Self {
            source,
            estimator,
            confirmed_only: false,
            max_rounds: DEFAULT_MAX_SELECTION_ROUNDS,
        }
    }

    /// Only consider confirmed UTXOs.
    pub fn with_confirmed_only(mut self, confirmed_only: bool) -> Self {
        self.confirmed_only = confirmed_only;
        self
    }

    /// Sets the bound on fixed-point rounds, at least one.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    /// Fetches the UTXOs of `address` and selects enough to cover `required`
    /// plus the fee.
    pub fn select(
        &self,
        address: &Address,
        required: Amount,
        fee_rate: FeeRate,
    ) -> SelectResult<Selection> {
        let mut utxos = self.source.fetch_utxos(address)?;
        debug!(%address, count = utxos.len(), "fetched utxos");

        if self.confirmed_only {
            utxos.retain(|u| u.confirmed);
        }

        let selection = select_largest_first(
            utxos,
            required,
            fee_rate,
            &self.estimator,
            self.max_rounds,
        )?;
        debug!(
            inputs = selection.chosen.len(),
            fee = %selection.fee,
            change = %selection.change,
            "selected utxos"
        );
        Ok(selection)
    }
}

/// Selects the shortest largest-first prefix of `utxos` covering `required`
/// plus the fee for that many inputs.
pub fn select_largest_first(
    mut utxos: Vec<Utxo>,
    required: Amount,
    fee_rate: FeeRate,
    estimator: &FeeEstimator,
    max_rounds: usize,
) -> SelectResult<Selection> {
    utxos.sort_by(|a, b| b.value.cmp(&a.value).then(a.outpoint.cmp(&b.outpoint)));

    let prefix_sums: Vec<Amount> = utxos
        .iter()
        .scan(Amount::ZERO, |acc, u| {
            *acc = acc.checked_add(u.value).unwrap_or(Amount::MAX);
            Some(*acc)
        })
        .collect();
    let available = prefix_sums.last().copied().unwrap_or(Amount::ZERO);

    let needed_for = |inputs: usize| {
        let fee = estimator.estimate(inputs, FUNDING_OUTPUT_COUNT, fee_rate);
        (fee, required.checked_add(fee).unwrap_or(Amount::MAX))
    };

    let mut assumed = 1;
    for _ in 0..max_rounds.max(1) {
        let (_, needed) = needed_for(assumed);
        let Some(idx) = prefix_sums.iter().position(|sum| *sum >= needed) else {
            return Err(SelectError::InsufficientFunds { needed, available });
        };

        let count = idx + 1;
        if count <= assumed {
            // Fewer inputs never cost more, so the prefix still covers its own fee.
            let (fee, needed) = needed_for(count);
            utxos.truncate(count);
            return Ok(Selection {
                chosen: utxos,
                fee,
                change: prefix_sums[idx] - needed,
            });
        }
        assumed = count;
    }

    let (_, needed) = needed_for(assumed);
    Err(SelectError::InsufficientFunds { needed, available })
}

#[cfg(test)]
mod tests {
    use bitcoin::ScriptBuf;
    use proptest::prelude::*;

    use super::*;
    use crate::error::SourceError;
    use crate::test_utils::{FixtureUtxoSource, fixture_utxo, funding_address};

    fn five_sat_vb() -> FeeRate {
        FeeRate::from_sat_per_kwu(1250)
    }

    #[test]
    fn test_single_utxo() {
        let utxos = vec![fixture_utxo(1, 100_000)];
        let sel = select_largest_first(
            utxos,
            Amount::from_sat(546),
            five_sat_vb(),
            &FeeEstimator::new(33),
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap();

        assert_eq!(sel.chosen().len(), 1);
        assert_eq!(sel.fee(), Amount::from_sat(865));
        assert_eq!(sel.change(), Amount::from_sat(98_589));
    }

    #[test]
    fn test_insufficient() {
        let utxos = vec![fixture_utxo(1, 1_000)];
        let err = select_largest_first(
            utxos,
            Amount::from_sat(546),
            five_sat_vb(),
            &FeeEstimator::new(33),
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SelectError::InsufficientFunds {
                needed: Amount::from_sat(546 + 865),
                available: Amount::from_sat(1_000),
            }
        );
    }

    #[test]
    fn test_empty_set() {
        let err = select_largest_first(
            Vec::new(),
            Amount::from_sat(546),
            five_sat_vb(),
            &FeeEstimator::new(33),
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SelectError::InsufficientFunds { available: Amount::ZERO, .. }
        ));
    }

    #[test]
    fn test_grows_input_count() {
        // Neither UTXO alone covers 546 plus a 1-input fee, both together cover
        // the 2-input fee.
        let utxos = vec![fixture_utxo(1, 800), fixture_utxo(2, 1_200)];
        let est = FeeEstimator::new(33);
        let sel = select_largest_first(
            utxos,
            Amount::from_sat(546),
            five_sat_vb(),
            &est,
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap();

        assert_eq!(sel.chosen().len(), 2);
        assert_eq!(sel.chosen()[0].value, Amount::from_sat(1_200));
        assert_eq!(sel.fee(), est.estimate(2, 2, five_sat_vb()));
        assert_eq!(
            sel.total_value(),
            Amount::from_sat(546) + sel.fee() + sel.change()
        );
    }

    #[test]
    fn test_round_bound() {
        // Many tiny UTXOs force several rounds, one round is not enough.
        let utxos: Vec<_> = (0..50).map(|i| fixture_utxo(i, 400)).collect();
        let est = FeeEstimator::new(33);
        let err = select_largest_first(utxos.clone(), Amount::from_sat(546), five_sat_vb(), &est, 1)
            .unwrap_err();
        assert!(matches!(err, SelectError::InsufficientFunds { .. }));

        let sel = select_largest_first(
            utxos,
            Amount::from_sat(546),
            five_sat_vb(),
            &est,
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap();
        assert!(sel.total_value() >= Amount::from_sat(546) + sel.fee());
    }

    #[test]
    fn test_ties_broken_by_outpoint() {
        let a = fixture_utxo(7, 5_000);
        let b = fixture_utxo(3, 5_000);
        let sel = select_largest_first(
            vec![a, b.clone()],
            Amount::from_sat(546),
            FeeRate::from_sat_per_kwu(250),
            &FeeEstimator::new(33),
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap();
        assert_eq!(sel.chosen(), &[b]);
    }

    #[test]
    fn test_selector_filters_unconfirmed() {
        let mut pending = fixture_utxo(1, 100_000);
        pending.confirmed = false;
        let source = FixtureUtxoSource::new(vec![pending, fixture_utxo(2, 2_000)]);
        let address = funding_address();

        let selector = UtxoSelector::new(&source, FeeEstimator::new(33));
        let sel = selector
            .select(&address, Amount::from_sat(546), five_sat_vb())
            .unwrap();
        assert_eq!(sel.chosen()[0].value, Amount::from_sat(100_000));

        let selector = selector.with_confirmed_only(true);
        let sel = selector
            .select(&address, Amount::from_sat(546), five_sat_vb())
            .unwrap();
        assert_eq!(sel.chosen()[0].value, Amount::from_sat(2_000));
    }

    #[test]
    fn test_selector_source_error() {
        let source = FixtureUtxoSource::failing(SourceError::Timeout);
        let selector = UtxoSelector::new(source, FeeEstimator::new(33));
        let err = selector
            .select(&funding_address(), Amount::from_sat(546), five_sat_vb())
            .unwrap_err();
        assert_eq!(err, SelectError::Source(SourceError::Timeout));
    }

    #[test]
    fn test_change_is_raw() {
        let utxos = vec![Utxo::new(
            fixture_utxo(1, 0).outpoint,
            Amount::from_sat(1_500),
            ScriptBuf::new(),
            true,
        )];
        let sel = select_largest_first(
            utxos,
            Amount::from_sat(546),
            five_sat_vb(),
            &FeeEstimator::new(33),
            DEFAULT_MAX_SELECTION_ROUNDS,
        )
        .unwrap();
        assert_eq!(sel.change(), Amount::from_sat(1_500 - 546 - 865));
    }

    proptest! {
        #[test]
        fn proptest_selection_covers_fee(
            values in proptest::collection::vec(1u64..2_000_000, 0..40),
            required in 0u64..5_000_000,
            kwu in 250u64..50_000,
            envelope_len in 0usize..10_000,
        ) {
            let utxos: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| fixture_utxo(i as u32, *v))
                .collect();
            let est = FeeEstimator::new(envelope_len);
            let rate = FeeRate::from_sat_per_kwu(kwu);
            let required = Amount::from_sat(required);

            match select_largest_first(utxos, required, rate, &est, DEFAULT_MAX_SELECTION_ROUNDS) {
                Ok(sel) => {
                    let fee = est.estimate(sel.chosen().len(), FUNDING_OUTPUT_COUNT, rate);
                    prop_assert_eq!(sel.fee(), fee);
                    prop_assert!(sel.total_value() >= required + fee);
                    prop_assert_eq!(sel.total_value(), required + fee + sel.change());
                }
                Err(SelectError::InsufficientFunds { needed, available }) => {
                    prop_assert!(needed > Amount::ZERO);
                    prop_assert_eq!(available, Amount::from_sat(values.iter().sum()));
                }
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
        }
    }
}
