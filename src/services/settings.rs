use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use crate::auth::Actor;
use crate::db::settings as settings_db;
use crate::error::{CrmError, CrmResult};
use crate::models::permissions::{Action, Module};
use crate::models::settings::{self, CurrencyPosition, default_for};
use crate::services::validation;
use crate::state::AppState;

/// Stored value for `key`, or `default` when it was never saved.
pub async fn get(state: &AppState, actor: &Actor, key: &str, default: &str) -> CrmResult<String> {
    state.authorize(actor, Module::Setting, Action::View).await?;
    Ok(settings_db::get_value(&state.db, key)
        .await?
        .unwrap_or_else(|| default.to_string()))
}

/// Every known key with its effective value, plus any other stored keys.
pub async fn get_all(state: &AppState, actor: &Actor) -> CrmResult<BTreeMap<String, String>> {
    state.authorize(actor, Module::Setting, Action::View).await?;
    let stored = settings_db::get_all(&state.db).await?;

    let mut all: BTreeMap<String, String> = settings::DEFAULTS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    all.extend(stored);
    Ok(all)
}

/// Validates the whole batch before writing anything; one bad value rejects all.
/// Returns how many keys were written.
pub async fn set_all(
    state: &AppState,
    actor: &Actor,
    csrf_token: &str,
    values: BTreeMap<String, String>,
) -> CrmResult<u64> {
    state
        .authorize_mutation(actor, Module::Setting, Action::Edit, csrf_token)
        .await?;
    let values = values
        .into_iter()
        .map(|(key, value)| validate_entry(&key, value).map(|value| (key, value)))
        .collect::<CrmResult<BTreeMap<_, _>>>()?;

    let written = settings_db::upsert_all(&state.db, values).await?;
    tracing::info!(actor = %actor.id, written, "Saved settings");
    Ok(written)
}

fn validate_entry(key: &str, value: String) -> CrmResult<String> {
    match key {
        settings::COMPANY_NAME => validation::required("Company name", &value),
        settings::CURRENCY_SYMBOL => validation::required("Currency symbol", &value),
        settings::CURRENCY_POSITION => match CurrencyPosition::parse(&value) {
            Some(_) => Ok(value),
            None => Err(CrmError::validation(
                "Currency position must be \"before\" or \"after\"",
            )),
        },
        settings::DECIMAL_SEPARATOR => match value.as_str() {
            "," | "." => Ok(value),
            _ => Err(CrmError::validation("Decimal separator must be \",\" or \".\"")),
        },
        settings::THOUSANDS_SEPARATOR => match value.as_str() {
            " " | "." | "," | "" => Ok(value),
            _ => Err(CrmError::validation(
                "Thousands separator must be a space, \".\", \",\" or empty",
            )),
        },
        settings::DATE_FORMAT => strftime_pattern("Date format", value),
        settings::TIME_FORMAT => strftime_pattern("Time format", value),
        _ => {
            validation::machine_name("Setting key", key)?;
            Ok(value)
        }
    }
}

fn strftime_pattern(label: &str, value: String) -> CrmResult<String> {
    let value = validation::required(label, &value)?;
    if StrftimeItems::new(&value).any(|item| matches!(item, Item::Error)) {
        return Err(CrmError::validation(format!("{label} is not a valid format")));
    }
    Ok(value)
}

/// Display settings used to render money and dates.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSettings {
    pub currency_symbol: String,
    pub currency_position: CurrencyPosition,
    pub decimal_separator: String,
    pub thousands_separator: String,
    pub date_format: String,
    pub time_format: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self::from_values(&HashMap::new())
    }
}

impl FormatSettings {
    pub async fn load(db: &DatabaseConnection) -> CrmResult<Self> {
        Ok(Self::from_values(&settings_db::get_all(db).await?))
    }

    pub fn from_values(values: &HashMap<String, String>) -> Self {
        let value = |key: &str| {
            values
                .get(key)
                .cloned()
                .or_else(|| default_for(key).map(str::to_string))
                .unwrap_or_default()
        };

        Self {
            currency_symbol: value(settings::CURRENCY_SYMBOL),
            currency_position: CurrencyPosition::parse(&value(settings::CURRENCY_POSITION))
                .unwrap_or(CurrencyPosition::After),
            decimal_separator: value(settings::DECIMAL_SEPARATOR),
            thousands_separator: value(settings::THOUSANDS_SEPARATOR),
            date_format: value(settings::DATE_FORMAT),
            time_format: value(settings::TIME_FORMAT),
        }
    }

    /// Two decimals, grouped thousands, symbol placed per `currency_position`.
    pub fn format_currency(&self, amount: f64) -> String {
        let fixed = format!("{:.2}", amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }

        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        let number = format!("{sign}{grouped}{}{fraction}", self.decimal_separator);
        match self.currency_position {
            CurrencyPosition::Before => format!("{} {number}", self.currency_symbol),
            CurrencyPosition::After => format!("{number} {}", self.currency_symbol),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        render(|out| write!(out, "{}", date.format(&self.date_format)))
            .unwrap_or_else(|| date.format("%Y-%m-%d").to_string())
    }

    pub fn format_datetime(&self, at: DateTime<Utc>) -> String {
        let pattern = format!("{} {}", self.date_format, self.time_format);
        render(|out| write!(out, "{}", at.format(&pattern)))
            .unwrap_or_else(|| at.format("%Y-%m-%d %H:%M").to_string())
    }
}

/// A stored pattern chrono cannot render yields `None` instead of panicking.
fn render(f: impl FnOnce(&mut String) -> std::fmt::Result) -> Option<String> {
    let mut out = String::new();
    f(&mut out).ok().map(|_| out)
}
