//! The salary file aggregate.
//!
//! Owns the opening record, the ordered payment records and, once
//! [`SalaryFile::finalize`] has run, the footer record. Rendering and saving
//! are only possible after finalization.

use crate::error::{Result, SalaryFileError};
use crate::field::{self, OverflowPolicy};
use crate::money::MinorUnits;
use crate::record::{FooterRecord, OpeningRecord, PaymentInput, PaymentRecord};
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A batch of salary payments from one sender.
///
/// # Finalization
///
/// `finalize` may be called any number of times. Each call recomputes the
/// footer from the payments present at that moment, so adding a payment
/// after finalizing leaves a stale footer until `finalize` runs again.
#[derive(Debug, Clone)]
pub struct SalaryFile {
    /// Creation date as supplied, `YYYY-MM-DD`.
    creation_date: String,

    policy: OverflowPolicy,

    opening: OpeningRecord,

    /// Payment records in insertion order, which is also output order.
    payments: Vec<PaymentRecord>,

    footer: Option<FooterRecord>,
}

impl SalaryFile {
    /// Creates an empty batch, truncating oversized fields.
    pub fn new(
        creation_date: &str,
        sender_customer_number: &str,
        sender_bankgiro_number: &str,
    ) -> Result<Self> {
        Self::with_policy(
            OverflowPolicy::default(),
            creation_date,
            sender_customer_number,
            sender_bankgiro_number,
        )
    }

    /// Creates an empty batch whose records handle oversized fields per `policy`.
    pub fn with_policy(
        policy: OverflowPolicy,
        creation_date: &str,
        sender_customer_number: &str,
        sender_bankgiro_number: &str,
    ) -> Result<Self> {
        let opening = OpeningRecord::with_policy(
            policy,
            creation_date,
            sender_customer_number,
            sender_bankgiro_number,
        )?;
        debug!(
            "Opened batch {} for customer {}",
            opening.creation_date(),
            opening.sender_customer_number()
        );

        Ok(SalaryFile {
            creation_date: creation_date.to_string(),
            policy,
            opening,
            payments: Vec::new(),
            footer: None,
        })
    }

    /// Validates and appends one payment.
    ///
    /// Nothing is appended if the payment fails to encode.
    pub fn add_payment(&mut self, input: &PaymentInput) -> Result<()> {
        let record = PaymentRecord::with_policy(self.policy, input)?;
        debug!(
            "Payment {}: {} öre to account {}",
            self.payments.len(),
            record.amount(),
            record.bank_account()
        );
        self.payments.push(record);
        Ok(())
    }

    /// Computes the footer from the current payments.
    ///
    /// The total is the exact sum of the already-rounded öre amounts.
    pub fn finalize(&mut self) -> Result<&FooterRecord> {
        let count = self.payments.len();
        let total = MinorUnits::checked_sum(self.payments.iter().map(PaymentRecord::amount))
            .ok_or(SalaryFileError::AmountOverflow { count })?;

        let footer = FooterRecord::with_policy(self.policy, &self.creation_date, total, count)?;
        info!("Finalized batch: {} payments, {} öre", count, total);
        Ok(self.footer.insert(footer))
    }

    /// Renders all lines joined by `\n`, without a trailing line break.
    pub fn render(&self) -> Result<String> {
        let footer = self.footer.as_ref().ok_or(SalaryFileError::NotFinalized)?;

        let mut lines = Vec::with_capacity(self.payments.len() + 2);
        lines.push(self.opening.format());
        lines.extend(self.payments.iter().map(PaymentRecord::format));
        lines.push(footer.format());
        Ok(lines.join("\n"))
    }

    /// Renders the document as Latin-1 bytes with a trailing line break.
    pub fn to_latin1(&self) -> Result<Vec<u8>> {
        let mut text = self.render()?;
        text.push('\n');
        field::to_latin1("salary file", &text)
    }

    /// Writes the Latin-1 document to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.to_latin1()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Saves the document to `path`.
    ///
    /// The file is only created once the whole document has been encoded.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_latin1()?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        writer.write_all(&bytes)?;
        writer.flush()?;
        info!("Wrote {} bytes to {}", bytes.len(), path.as_ref().display());
        Ok(())
    }

    pub fn opening(&self) -> &OpeningRecord {
        &self.opening
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// The footer, or `None` before the first `finalize`.
    pub fn footer(&self) -> Option<&FooterRecord> {
        self.footer.as_ref()
    }

    pub fn is_finalized(&self) -> bool {
        self.footer.is_some()
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Number of payment records.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}
