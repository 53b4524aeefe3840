//! Assembly of the unsigned inscription transaction.
//!
//! Output 0 always carries the inscription. It pays [`INSCRIPTION_POSTAGE`] to
//! the P2WSH commitment of the envelope script, so spending it reveals the
//! envelope in the witness. An optional change output follows.

use bitcoin::hashes::Hash;
use bitcoin::psbt::Psbt;
use bitcoin::transaction::Version;
use bitcoin::{
    Address, Amount, Network, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, WScriptHash,
    Witness, absolute,
};
use ordkit_envelope_fmt::{EnvelopeScript, MAX_ENVELOPE_LEN};

use crate::error::{BuildError, BuildResult};
use crate::utxo::Utxo;

/// Value of the inscription output.
pub const INSCRIPTION_POSTAGE: Amount = Amount::from_sat(546);

/// Change at or below this value is folded into the fee.
pub const DUST_THRESHOLD: Amount = Amount::from_sat(546);

/// Index of the inscription output.
pub const INSCRIPTION_OUTPUT_INDEX: usize = 0;

/// P2WSH script committing to `envelope`.
///
/// The funding transaction only commits to the envelope. The content appears
/// on chain once this output is spent with the envelope as witness script,
/// which is a separate transaction outside this crate.
///
/// The envelope leaves nothing on the stack that needs a signature, so once
/// it is known anyone can spend the output with the witness `[0x01, envelope]`.
/// Whoever reveals the inscription should do so before publishing the
/// envelope anywhere else.
pub fn commitment_script(envelope: &EnvelopeScript) -> ScriptBuf {
    ScriptBuf::new_p2wsh(&WScriptHash::hash(envelope.as_script().as_bytes()))
}

/// Builds unsigned inscription transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network: Network,
    postage: Amount,
    dust_threshold: Amount,
}

impl TransactionBuilder {
    /// Constructs a builder with the default postage and dust threshold.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            postage: INSCRIPTION_POSTAGE,
            dust_threshold: DUST_THRESHOLD,
        }
    }

    /// Sets the value of the inscription output.
    pub fn with_postage(mut self, postage: Amount) -> Self {
        self.postage = postage;
        self
    }

    /// Sets the threshold below which change is dropped.
    pub fn with_dust_threshold(mut self, dust_threshold: Amount) -> Self {
        self.dust_threshold = dust_threshold;
        self
    }

    /// Network the transactions are built for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Value of the inscription output.
    pub fn postage(&self) -> Amount {
        self.postage
    }

    /// Builds a transaction spending all of `inputs`.
    ///
    /// `fee` is the minimum fee. Change at or below the dust threshold is
    /// added to it instead of getting an output. Envelopes longer than
    /// [`MAX_ENVELOPE_LEN`] are rejected, since the commitment could never be
    /// spent.
    pub fn build(
        &self,
        inputs: &[Utxo],
        envelope: &EnvelopeScript,
        change_address: Option<&Address>,
        fee: Amount,
    ) -> BuildResult<UnsignedTransaction> {
        if inputs.is_empty() {
            return Err(BuildError::EmptyInputs);
        }
        if envelope.len() > MAX_ENVELOPE_LEN {
            return Err(BuildError::EnvelopeTooLarge {
                len: envelope.len(),
                max: MAX_ENVELOPE_LEN,
            });
        }

        let input_value = inputs
            .iter()
            .try_fold(Amount::ZERO, |acc, u| acc.checked_add(u.value))
            .ok_or(BuildError::AmountOverflow)?;
        let spend = self
            .postage
            .checked_add(fee)
            .ok_or(BuildError::AmountOverflow)?;
        let change = input_value
            .checked_sub(spend)
            .ok_or(BuildError::InsufficientFunds {
                needed: spend,
                available: input_value,
            })?;

        let mut output = vec![TxOut {
            value: self.postage,
            script_pubkey: commitment_script(envelope),
        }];

        let change = if change > self.dust_threshold {
            let address = change_address.ok_or(BuildError::NoChangeAddress(change))?;
            output.push(TxOut {
                value: change,
                script_pubkey: address.script_pubkey(),
            });
            Some(change)
        } else {
            None
        };

        let input = inputs
            .iter()
            .map(|u| TxIn {
                previous_output: u.outpoint,
                script_sig: ScriptBuf::new(),
                sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
                witness: Witness::new(),
            })
            .collect();

        let tx = Transaction {
            version: Version::TWO,
            lock_time: absolute::LockTime::ZERO,
            input,
            output,
        };

        Ok(UnsignedTransaction {
            tx,
            prevouts: inputs.iter().map(Utxo::txout).collect(),
            envelope: envelope.clone(),
            network: self.network,
            fee: input_value - self.postage - change.unwrap_or(Amount::ZERO),
            change,
        })
    }
}

/// An unsigned transaction ready to hand to a signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    tx: Transaction,
    prevouts: Vec<TxOut>,
    envelope: EnvelopeScript,
    network: Network,
    fee: Amount,
    change: Option<Amount>,
}

impl UnsignedTransaction {
    /// The transaction itself.
    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    /// Outputs being spent, in input order.
    pub fn prevouts(&self) -> &[TxOut] {
        &self.prevouts
    }

    /// Envelope committed to by the inscription output.
    pub fn envelope(&self) -> &EnvelopeScript {
        &self.envelope
    }

    /// Network the transaction was built for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Fee actually paid, including any folded change.
    pub fn fee(&self) -> Amount {
        self.fee
    }

    /// Value of the change output, if there is one.
    pub fn change(&self) -> Option<Amount> {
        self.change
    }

    /// The inscription output.
    pub fn inscription_output(&self) -> &TxOut {
        &self.tx.output[INSCRIPTION_OUTPUT_INDEX]
    }

    /// Sum of the spent outputs.
    pub fn input_value(&self) -> Amount {
        self.prevouts.iter().map(|o| o.value).sum()
    }

    /// Sum of the created outputs.
    pub fn output_value(&self) -> Amount {
        self.tx.output.iter().map(|o| o.value).sum()
    }

    /// Txid of the transaction, which signing does not change.
    pub fn txid(&self) -> Txid {
        self.tx.compute_txid()
    }

    /// Exports as a PSBT with `witness_utxo` on every input and the envelope
    /// as the inscription output's witness script.
    pub fn to_psbt(&self) -> BuildResult<Psbt> {
        let mut psbt = Psbt::from_unsigned_tx(self.tx.clone())?;
        for (input, prevout) in psbt.inputs.iter_mut().zip(&self.prevouts) {
            input.witness_utxo = Some(prevout.clone());
        }
        psbt.outputs[INSCRIPTION_OUTPUT_INDEX].witness_script =
            Some(self.envelope.as_script().to_owned());
        Ok(psbt)
    }

    /// Exports as base64 PSBT text.
    pub fn to_psbt_base64(&self) -> BuildResult<String> {
        Ok(self.to_psbt()?.to_string())
    }

    /// Exports as binary PSBT.
    pub fn to_psbt_bytes(&self) -> BuildResult<Vec<u8>> {
        Ok(self.to_psbt()?.serialize())
    }
}
