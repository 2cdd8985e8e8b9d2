//! Historical trade records consumed by the optimizer.

use crate::allocation::error::AllocationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Names of the fields every trade record must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["amount", "maker_bank", "rate", "trade_date"];

/// One historical trade executed with a maker.
///
/// A slice of records forms the historical dataset. The optimizer never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Calendar date the trade was executed on
    pub trade_date: NaiveDate,
    /// Identifier of the maker (counterparty) that filled the trade
    pub maker_bank: String,
    /// Traded volume, non-negative
    pub amount: f64,
    /// Execution rate of the trade
    pub rate: f64,
}

impl TradeRecord {
    /// Creates a new trade record.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use maker_allocation::TradeRecord;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let trade = TradeRecord::new(date, "BANK_A", 250_000.0, 1.0842);
    /// assert_eq!(trade.maker_bank, "BANK_A");
    /// ```
    #[must_use]
    pub fn new(trade_date: NaiveDate, maker_bank: impl Into<String>, amount: f64, rate: f64) -> Self {
        Self {
            trade_date,
            maker_bank: maker_bank.into(),
            amount,
            rate,
        }
    }

    /// Checks that the record's values are usable by the optimizer.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::Data` if the maker identifier is empty, the
    /// amount is negative or not finite, or the rate is not finite.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.maker_bank.trim().is_empty() {
            return Err(AllocationError::data(format!(
                "trade on {} has an empty maker_bank",
                self.trade_date
            )));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(AllocationError::data(format!(
                "trade with {} on {} has invalid amount {}",
                self.maker_bank, self.trade_date, self.amount
            )));
        }
        if !self.rate.is_finite() {
            return Err(AllocationError::data(format!(
                "trade with {} on {} has invalid rate {}",
                self.maker_bank, self.trade_date, self.rate
            )));
        }
        Ok(())
    }

    /// Converts a batch of loosely-typed records, reporting every missing
    /// field across the whole batch at once.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::Data` naming the missing fields, sorted.
    pub fn from_raw_batch(
        records: impl IntoIterator<Item = RawTradeRecord>,
    ) -> Result<Vec<TradeRecord>, AllocationError> {
        let mut missing = BTreeSet::new();
        let mut trades = Vec::new();

        for raw in records {
            let absent = raw.missing_fields();
            if absent.is_empty() {
                if let Some(trade) = raw.into_trade() {
                    trades.push(trade);
                }
            } else {
                missing.extend(absent);
            }
        }

        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }
        Ok(trades)
    }
}

/// A trade record whose fields may be absent.
///
/// This is the shape a loosely-typed collaborator hands over before its
/// columns have been checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTradeRecord {
    /// Calendar date the trade was executed on
    #[serde(default)]
    pub trade_date: Option<NaiveDate>,
    /// Maker identifier
    #[serde(default)]
    pub maker_bank: Option<String>,
    /// Traded volume
    #[serde(default)]
    pub amount: Option<f64>,
    /// Execution rate
    #[serde(default)]
    pub rate: Option<f64>,
}

impl RawTradeRecord {
    /// Names of the required fields this record lacks, in sorted order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.amount.is_some(),
            self.maker_bank.is_some(),
            self.rate.is_some(),
            self.trade_date.is_some(),
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }

    fn into_trade(self) -> Option<TradeRecord> {
        Some(TradeRecord {
            trade_date: self.trade_date?,
            maker_bank: self.maker_bank?,
            amount: self.amount?,
            rate: self.rate?,
        })
    }
}

impl TryFrom<RawTradeRecord> for TradeRecord {
    type Error = AllocationError;

    fn try_from(raw: RawTradeRecord) -> Result<Self, Self::Error> {
        let missing: BTreeSet<&'static str> = raw.missing_fields().into_iter().collect();
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }
        raw.into_trade()
            .ok_or_else(|| AllocationError::data("trade record is incomplete"))
    }
}

fn missing_fields_error(missing: &BTreeSet<&'static str>) -> AllocationError {
    let names: Vec<&str> = missing.iter().copied().collect();
    AllocationError::data(format!(
        "missing fields for maker statistics: {}",
        names.join(", ")
    ))
}
