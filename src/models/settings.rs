use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `settings` key/value table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const COMPANY_NAME: &str = "company_name";
pub const CURRENCY_SYMBOL: &str = "currency_symbol";
pub const CURRENCY_POSITION: &str = "currency_position";
pub const DECIMAL_SEPARATOR: &str = "decimal_separator";
pub const THOUSANDS_SEPARATOR: &str = "thousands_separator";
pub const DATE_FORMAT: &str = "date_format";
pub const TIME_FORMAT: &str = "time_format";

/// Known keys and the value used when the key has never been saved.
pub const DEFAULTS: &[(&str, &str)] = &[
    (COMPANY_NAME, "My Company"),
    (CURRENCY_SYMBOL, "NOK"),
    (CURRENCY_POSITION, "after"),
    (DECIMAL_SEPARATOR, ","),
    (THOUSANDS_SEPARATOR, " "),
    (DATE_FORMAT, "%d.%m.%Y"),
    (TIME_FORMAT, "%H:%M"),
];

pub fn default_for(key: &str) -> Option<&'static str> {
    DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPosition {
    Before,
    After,
}

impl CurrencyPosition {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "before" => Some(CurrencyPosition::Before),
            "after" => Some(CurrencyPosition::After),
            _ => None,
        }
    }
}
