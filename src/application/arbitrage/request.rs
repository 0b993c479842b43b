//! Inbound request shapes for the arbitrage workflows.
//!
//! Required fields are `Option` so that a missing value is reported as a
//! [`ValidationError::MissingField`] instead of a deserialization failure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::product::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::domain::profitability::ProfitabilityFigures;

/// Search for items worth relisting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub keywords: Option<String>,
    pub category: Option<String>,
    pub min_profit: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

/// List one sourced item on the selling marketplace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub source_id: Option<String>,
    pub markup_percent: Option<Decimal>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Price check for one sourced item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckProfitabilityRequest {
    pub source_id: Option<String>,
    pub cost_price: Option<Decimal>,
}

/// Profitability answer, with the worker's product document when the price
/// had to be resolved live.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityReport {
    #[serde(flatten)]
    pub figures: ProfitabilityFigures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_details: Option<serde_json::Value>,
}

pub(super) struct ValidSearch<'a> {
    pub keywords: &'a str,
    pub category: Option<&'a str>,
    pub min_profit: Decimal,
    pub max_price: Decimal,
}

pub(super) struct ValidList<'a> {
    pub source_id: &'a str,
    pub markup_percent: Decimal,
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
}

fn required<'a>(value: Option<&'a String>, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField { field })
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn non_negative(value: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::InvalidValue {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(value)
}

fn max_len(value: Option<&str>, limit: usize, field: &'static str) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > limit => Err(ValidationError::InvalidValue {
            field,
            reason: format!("cannot be more than {limit} characters"),
        }),
        _ => Ok(()),
    }
}

impl SearchRequest {
    pub(super) fn validate(
        &self,
        default_min_profit: Decimal,
        default_max_price: Decimal,
    ) -> Result<ValidSearch<'_>, ValidationError> {
        let keywords = required(self.keywords.as_ref(), "keywords")?;
        let min_profit = non_negative(self.min_profit.unwrap_or(default_min_profit), "minProfit")?;
        let max_price = self.max_price.unwrap_or(default_max_price);
        if max_price <= Decimal::ZERO {
            return Err(ValidationError::InvalidValue {
                field: "maxPrice",
                reason: format!("must be positive, got {max_price}"),
            });
        }
        Ok(ValidSearch {
            keywords,
            category: non_blank(self.category.as_ref()),
            min_profit,
            max_price,
        })
    }
}

impl ListRequest {
    pub(super) fn validate(&self) -> Result<ValidList<'_>, ValidationError> {
        let source_id = required(self.source_id.as_ref(), "sourceId")?;
        let markup_percent = self
            .markup_percent
            .ok_or(ValidationError::MissingField {
                field: "markupPercent",
            })
            .and_then(|m| non_negative(m, "markupPercent"))?;
        let title = non_blank(self.title.as_ref());
        let description = non_blank(self.description.as_ref());
        max_len(title, MAX_TITLE_LEN, "title")?;
        max_len(description, MAX_DESCRIPTION_LEN, "description")?;
        Ok(ValidList {
            source_id,
            markup_percent,
            title,
            description,
        })
    }
}

impl CheckProfitabilityRequest {
    pub(super) fn validate(&self) -> Result<&str, ValidationError> {
        required(self.source_id.as_ref(), "sourceId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn search_applies_defaults() {
        let request = SearchRequest {
            keywords: Some(" lego ".into()),
            ..Default::default()
        };
        let valid = request.validate(dec!(5), dec!(100)).unwrap();

        assert_eq!(valid.keywords, "lego");
        assert_eq!(valid.min_profit, dec!(5));
        assert_eq!(valid.max_price, dec!(100));
        assert!(valid.category.is_none());
    }

    #[test]
    fn search_rejects_blank_keywords() {
        let request = SearchRequest {
            keywords: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            request.validate(dec!(5), dec!(100)).err(),
            Some(ValidationError::MissingField { field: "keywords" })
        );
    }

    #[test]
    fn list_requires_markup() {
        let request = ListRequest {
            source_id: Some("B000123".into()),
            ..Default::default()
        };
        assert_eq!(
            request.validate().err(),
            Some(ValidationError::MissingField {
                field: "markupPercent"
            })
        );
    }

    #[test]
    fn list_rejects_long_title() {
        let request = ListRequest {
            source_id: Some("B000123".into()),
            markup_percent: Some(dec!(20)),
            title: Some("x".repeat(MAX_TITLE_LEN + 1)),
            description: None,
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidValue { field: "title", .. })
        ));
    }

    #[test]
    fn requests_deserialize_from_camel_case() {
        let request: ListRequest = serde_json::from_str(
            r#"{"sourceId":"B01","markupPercent":"12.5","title":"Desk lamp"}"#,
        )
        .unwrap();
        assert_eq!(request.markup_percent, Some(dec!(12.5)));

        let check: CheckProfitabilityRequest =
            serde_json::from_str(r#"{"sourceId":"B01","costPrice":19.99}"#).unwrap();
        assert_eq!(check.cost_price, Some(dec!(19.99)));
    }
}
