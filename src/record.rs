//! The three record types of a salary file.
//!
//! Records validate and encode their fields when they are constructed, so a
//! record that exists can always be rendered. Rendering only assembles the
//! stored fields through the record's layout table.

use crate::error::Result;
use crate::field::{self, OverflowPolicy, DATE_WIDTH};
use crate::layout::{self, Column};
use crate::money::{AmountInput, MinorUnits};

/// Product code identifying a salary batch.
pub const PRODUCT_CODE: &str = "LÖN";

pub const BANK_ACCOUNT_WIDTH: usize = 16;
pub const AMOUNT_WIDTH: usize = 12;
pub const EMPLOYMENT_INFO_WIDTH: usize = 10;
pub const PAYMENT_IDENTIFICATION_WIDTH: usize = 12;
pub const CUSTOMER_NUMBER_WIDTH: usize = 6;
pub const BANKGIRO_WIDTH: usize = 10;
pub const RECORD_COUNT_WIDTH: usize = 6;

const SENDER_CUSTOMER_NUMBER: Column =
    Column::numeric("sender_customer_number", CUSTOMER_NUMBER_WIDTH);
const SENDER_BANKGIRO_NUMBER: Column = Column::numeric("sender_bankgiro_number", BANKGIRO_WIDTH);
const BANK_ACCOUNT: Column = Column::numeric("bank_account", BANK_ACCOUNT_WIDTH);
const AMOUNT: Column = Column::numeric("amount", AMOUNT_WIDTH);
// Zero-padded although the content is free text
const EMPLOYMENT_INFO: Column = Column::numeric("employment_info", EMPLOYMENT_INFO_WIDTH);
const PAYMENT_IDENTIFICATION: Column =
    Column::text("payment_identification", PAYMENT_IDENTIFICATION_WIDTH);
const TOTAL_AMOUNT: Column = Column::numeric("total_amount", AMOUNT_WIDTH);
const RECORD_COUNT: Column = Column::numeric("record_count", RECORD_COUNT_WIDTH);

/// Opening line: transaction code `01`.
pub const OPENING_LAYOUT: &[Column] = &[
    Column::constant("transaction_code", 2, "01"),
    Column::numeric("creation_date", DATE_WIDTH),
    Column::filler("reserved_1", 2, ' '),
    Column::constant("product_code", 50, PRODUCT_CODE),
    // Left blank: the receiving bank rejects an explicit "SEK" on import
    Column::filler("currency_code", 3, ' '),
    SENDER_CUSTOMER_NUMBER,
    SENDER_BANKGIRO_NUMBER,
    Column::filler("reserved_2", 1, ' '),
];

/// Payment line: transaction code `35`.
pub const PAYMENT_LAYOUT: &[Column] = &[
    Column::constant("transaction_code", 2, "35"),
    Column::numeric("payment_date", DATE_WIDTH),
    Column::filler("reserved_1", 4, ' '),
    BANK_ACCOUNT,
    AMOUNT,
    Column::filler("reserved_2", 18, ' '),
    EMPLOYMENT_INFO,
    PAYMENT_IDENTIFICATION,
];

/// Footer line: transaction code `09`.
pub const FOOTER_LAYOUT: &[Column] = &[
    Column::constant("transaction_code", 2, "09"),
    Column::numeric("creation_date", DATE_WIDTH),
    Column::filler("reserved_1", 20, ' '),
    TOTAL_AMOUNT,
    RECORD_COUNT,
    Column::filler("reserved_2", 34, '0'),
];

/// Sender identity and batch metadata; first line of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningRecord {
    creation_date: String,
    sender_customer_number: String,
    sender_bankgiro_number: String,
}

impl OpeningRecord {
    /// Creates an opening record with the default truncating policy.
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

    /// Creates an opening record, handling oversized ids according to `policy`.
    pub fn with_policy(
        policy: OverflowPolicy,
        creation_date: &str,
        sender_customer_number: &str,
        sender_bankgiro_number: &str,
    ) -> Result<Self> {
        Ok(OpeningRecord {
            creation_date: field::encode_date("creation_date", creation_date)?,
            sender_customer_number: SENDER_CUSTOMER_NUMBER.encode(sender_customer_number, policy)?,
            sender_bankgiro_number: SENDER_BANKGIRO_NUMBER.encode(sender_bankgiro_number, policy)?,
        })
    }

    /// Encoded `YYMMDD` creation date.
    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    pub fn sender_customer_number(&self) -> &str {
        &self.sender_customer_number
    }

    pub fn sender_bankgiro_number(&self) -> &str {
        &self.sender_bankgiro_number
    }

    /// Renders the 80-column line.
    pub fn format(&self) -> String {
        layout::render(
            OPENING_LAYOUT,
            &[
                &self.creation_date,
                &self.sender_customer_number,
                &self.sender_bankgiro_number,
            ],
        )
    }
}

/// Input for one payment instruction.
///
/// The optional fields default to empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInput {
    pub payment_date: String,
    pub bank_account: String,
    pub amount: AmountInput,
    pub employment_info: String,
    pub payment_identification: String,
}

impl PaymentInput {
    /// Creates an input with the required fields and empty optional ones.
    pub fn new(
        payment_date: impl Into<String>,
        bank_account: impl Into<String>,
        amount: impl Into<AmountInput>,
    ) -> Self {
        PaymentInput {
            payment_date: payment_date.into(),
            bank_account: bank_account.into(),
            amount: amount.into(),
            employment_info: String::new(),
            payment_identification: String::new(),
        }
    }

    pub fn employment_info(mut self, value: impl Into<String>) -> Self {
        self.employment_info = value.into();
        self
    }

    pub fn payment_identification(mut self, value: impl Into<String>) -> Self {
        self.payment_identification = value.into();
        self
    }
}

/// One disbursement instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    payment_date: String,
    bank_account: String,
    amount: MinorUnits,
    amount_field: String,
    employment_info: String,
    payment_identification: String,
}

impl PaymentRecord {
    /// Creates a payment record with the default truncating policy.
    pub fn new(input: &PaymentInput) -> Result<Self> {
        Self::with_policy(OverflowPolicy::default(), input)
    }

    /// Creates a payment record, handling oversized fields according to `policy`.
    pub fn with_policy(policy: OverflowPolicy, input: &PaymentInput) -> Result<Self> {
        let payment_date = field::encode_date("payment_date", &input.payment_date)?;
        let amount = MinorUnits::from_amount(&input.amount)?;

        Ok(PaymentRecord {
            payment_date,
            bank_account: BANK_ACCOUNT.encode(&input.bank_account, policy)?,
            amount,
            amount_field: AMOUNT.encode(&amount.to_string(), policy)?,
            employment_info: EMPLOYMENT_INFO.encode(&input.employment_info, policy)?,
            payment_identification: PAYMENT_IDENTIFICATION
                .encode(&input.payment_identification, policy)?,
        })
    }

    /// Encoded `YYMMDD` payment date.
    pub fn payment_date(&self) -> &str {
        &self.payment_date
    }

    pub fn bank_account(&self) -> &str {
        &self.bank_account
    }

    /// Amount in öre, before any column truncation.
    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn employment_info(&self) -> &str {
        &self.employment_info
    }

    pub fn payment_identification(&self) -> &str {
        &self.payment_identification
    }

    /// Renders the 80-column line.
    pub fn format(&self) -> String {
        layout::render(
            PAYMENT_LAYOUT,
            &[
                &self.payment_date,
                &self.bank_account,
                &self.amount_field,
                &self.employment_info,
                &self.payment_identification,
            ],
        )
    }
}

/// Batch totals; last line of the file.
///
/// A total longer than twelve digits keeps only its last twelve under the
/// default policy, which silently misreports the batch. Use
/// [`OverflowPolicy::Reject`] to turn that into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterRecord {
    creation_date: String,
    total_amount: MinorUnits,
    record_count: usize,
    total_field: String,
    count_field: String,
}

impl FooterRecord {
    /// Creates a footer record with the default truncating policy.
    pub fn new(creation_date: &str, total_amount: MinorUnits, record_count: usize) -> Result<Self> {
        Self::with_policy(
            OverflowPolicy::default(),
            creation_date,
            total_amount,
            record_count,
        )
    }

    /// Creates a footer record, handling oversized totals according to `policy`.
    pub fn with_policy(
        policy: OverflowPolicy,
        creation_date: &str,
        total_amount: MinorUnits,
        record_count: usize,
    ) -> Result<Self> {
        Ok(FooterRecord {
            creation_date: field::encode_date("creation_date", creation_date)?,
            total_amount,
            record_count,
            total_field: TOTAL_AMOUNT.encode(&total_amount.to_string(), policy)?,
            count_field: RECORD_COUNT.encode(&record_count.to_string(), policy)?,
        })
    }

    /// Encoded `YYMMDD` creation date.
    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    pub fn total_amount(&self) -> MinorUnits {
        self.total_amount
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Renders the 80-column line.
    pub fn format(&self) -> String {
        layout::render(
            FOOTER_LAYOUT,
            &[&self.creation_date, &self.total_field, &self.count_field],
        )
    }
}
