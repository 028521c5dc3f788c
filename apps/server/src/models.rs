//! Request DTOs and body validation.
//!
//! Every required-field failure in a body produces a single 400 listing all
//! absent fields. Numeric fields accept either JSON numbers or numeric
//! strings, matching what the web frontend actually posts.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::ApiError;
use wheeltrack_core::trades::{
    CloseTrade, NewTrade, NewTradeAdjustment, OptionType, TradeUpdate,
};
use wheeltrack_core::users::UserProfileUpdate;

/// A JSON value that should be numeric but may arrive as a string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) if n.is_finite() => Some(*n),
            NumberOrString::Number(_) => None,
            NumberOrString::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        let n = self.as_f64()?;
        if n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
            return None;
        }
        Some(n as i32)
    }
}

fn required_text(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn missing_fields_error(missing: Vec<&'static str>) -> ApiError {
    ApiError::BadRequest(format!("Missing required fields: {}", missing.join(", ")))
}

fn numeric_field(value: &NumberOrString, name: &str) -> Result<f64, ApiError> {
    value
        .as_f64()
        .ok_or_else(|| ApiError::BadRequest(format!("Field '{name}' must be a number")))
}

fn integer_field(value: &NumberOrString, name: &str) -> Result<i32, ApiError> {
    value
        .as_i32()
        .ok_or_else(|| ApiError::BadRequest(format!("Field '{name}' must be a whole number")))
}

fn present_f64(value: Option<NumberOrString>, name: &'static str) -> Result<f64, ApiError> {
    match value {
        Some(v) => numeric_field(&v, name),
        None => Err(missing_fields_error(vec![name])),
    }
}

fn present_i32(value: Option<NumberOrString>, name: &'static str) -> Result<i32, ApiError> {
    match value {
        Some(v) => integer_field(&v, name),
        None => Err(missing_fields_error(vec![name])),
    }
}

fn date_field(value: &str, name: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Field '{name}' must be a YYYY-MM-DD date")))
}

fn timestamp_field(value: &str, name: &str) -> Result<NaiveDateTime, ApiError> {
    let trimmed = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map_err(|_| {
        ApiError::BadRequest(format!("Field '{name}' must be an ISO-8601 timestamp"))
    })
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct SignupFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(self) -> Result<SignupFields, ApiError> {
        let mut missing = Vec::new();
        let fields = SignupFields {
            first_name: required_text(self.first_name, "firstName", &mut missing),
            last_name: required_text(self.last_name, "lastName", &mut missing),
            email: required_text(self.email, "email", &mut missing),
            username: required_text(self.username, "username", &mut missing),
            password: required_text(self.password, "password", &mut missing),
        };
        if !missing.is_empty() {
            return Err(missing_fields_error(missing));
        }
        Ok(fields)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email or username.
    pub identifier: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<(String, String), ApiError> {
        let mut missing = Vec::new();
        let identifier = required_text(self.identifier, "identifier", &mut missing);
        let password = required_text(self.password, "password", &mut missing);
        if !missing.is_empty() {
            return Err(missing_fields_error(missing));
        }
        Ok((identifier, password))
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    pub name: Option<String>,
    pub starting_capital: Option<NumberOrString>,
}

impl CreatePortfolioRequest {
    pub fn validate(self) -> Result<(String, f64), ApiError> {
        let mut missing = Vec::new();
        let name = required_text(self.name, "name", &mut missing);
        if self.starting_capital.is_none() {
            missing.push("startingCapital");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(missing));
        }
        let starting_capital = present_f64(self.starting_capital, "startingCapital")?;
        Ok((name, starting_capital))
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradeRequest {
    pub ticker: Option<String>,
    pub strike_price: Option<NumberOrString>,
    pub expiration_date: Option<String>,
    pub option_type: Option<String>,
    pub contracts: Option<NumberOrString>,
    pub contract_price: Option<NumberOrString>,
    pub notes: Option<String>,
}

impl CreateTradeRequest {
    pub fn validate(self) -> Result<NewTrade, ApiError> {
        let mut missing = Vec::new();
        let ticker = required_text(self.ticker, "ticker", &mut missing);
        let expiration = required_text(self.expiration_date, "expirationDate", &mut missing);
        let option_type_raw = required_text(self.option_type, "optionType", &mut missing);
        if self.strike_price.is_none() {
            missing.push("strikePrice");
        }
        if self.contracts.is_none() {
            missing.push("contracts");
        }
        if self.contract_price.is_none() {
            missing.push("contractPrice");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(missing));
        }

        let strike_price = present_f64(self.strike_price, "strikePrice")?;
        let contracts = present_i32(self.contracts, "contracts")?;
        let contract_price = present_f64(self.contract_price, "contractPrice")?;
        let expiration_date = date_field(&expiration, "expirationDate")?;
        let option_type = OptionType::parse(&option_type_raw).ok_or_else(|| {
            ApiError::BadRequest("Field 'optionType' must be PUT or CALL".to_string())
        })?;

        Ok(NewTrade {
            id: None,
            ticker,
            strike_price,
            expiration_date,
            option_type,
            contracts,
            contract_price,
            notes: self.notes,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTradeRequest {
    pub entry_price: Option<NumberOrString>,
    pub expiration_date: Option<String>,
    pub notes: Option<String>,
}

impl UpdateTradeRequest {
    pub fn validate(self) -> Result<TradeUpdate, ApiError> {
        let expiration = self
            .expiration_date
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing_fields_error(vec!["expirationDate"]))?;
        let expiration_date = date_field(&expiration, "expirationDate")?;
        let contract_price = self
            .entry_price
            .as_ref()
            .map(|v| numeric_field(v, "entryPrice"))
            .transpose()?;
        Ok(TradeUpdate {
            contract_price,
            expiration_date,
            notes: self.notes,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdjustmentRequest {
    pub contracts: Option<NumberOrString>,
    pub price: Option<NumberOrString>,
    pub notes: Option<String>,
}

impl CreateAdjustmentRequest {
    pub fn validate(self) -> Result<NewTradeAdjustment, ApiError> {
        let mut missing = Vec::new();
        if self.contracts.is_none() {
            missing.push("contracts");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if !missing.is_empty() {
            return Err(missing_fields_error(missing));
        }
        let contracts = present_i32(self.contracts, "contracts")?;
        let price = present_f64(self.price, "price")?;
        Ok(NewTradeAdjustment {
            contracts,
            price,
            notes: self.notes,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CloseTradeRequest {
    pub premium_captured: Option<NumberOrString>,
    pub closed_at: Option<String>,
}

impl CloseTradeRequest {
    pub fn validate(self) -> Result<CloseTrade, ApiError> {
        let premium = self
            .premium_captured
            .as_ref()
            .ok_or_else(|| missing_fields_error(vec!["premiumCaptured"]))?;
        let premium_captured = numeric_field(premium, "premiumCaptured")?;
        let closed_at = self
            .closed_at
            .as_deref()
            .map(|v| timestamp_field(v, "closedAt"))
            .transpose()?;
        Ok(CloseTrade {
            premium_captured,
            closed_at,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileRequest> for UserProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            avatar_url: req.avatar_url,
        }
    }
}
