use crate::domain::pricing_settings::TradePricingSettings;
use crate::domain::types::ProfileId;
use crate::dto::settings::TradeSettingsView;
use crate::forms::settings::PricingSettingsForm;
use crate::pricing::{PricingSettings, Trade, TradeSchedule};
use crate::repository::{PricingSettingsReader, PricingSettingsWriter};
use crate::services::{ServiceError, ServiceResult};

/// Every trade with its measurable quantities and default rates.
pub fn list_trades() -> Vec<TradeSchedule> {
    Trade::ALL.into_iter().map(Trade::schedule).collect()
}

/// Trades are addressed by their key in the URL; unknown keys do not exist.
pub(crate) fn parse_trade(raw: &str) -> ServiceResult<Trade> {
    raw.trim().parse().map_err(|_| ServiceError::NotFound)
}

/// Settings used to price work in `trade`: the stored ones or the defaults.
pub(crate) fn effective_settings<R>(
    repo: &R,
    profile_id: ProfileId,
    trade: Trade,
) -> ServiceResult<PricingSettings>
where
    R: PricingSettingsReader + ?Sized,
{
    Ok(repo
        .get_pricing_settings(profile_id, trade)?
        .map(|stored| stored.settings)
        .unwrap_or_default())
}

pub fn get_trade_settings<R>(
    repo: &R,
    profile_id: ProfileId,
    trade: &str,
) -> ServiceResult<TradeSettingsView>
where
    R: PricingSettingsReader + ?Sized,
{
    let trade = parse_trade(trade)?;
    let stored = repo
        .get_pricing_settings(profile_id, trade)
        .map_err(|err| {
            log::error!("Failed to load {trade} settings: {err}");
            ServiceError::from(err)
        })?
        .unwrap_or_else(|| TradePricingSettings::defaults(profile_id, trade));

    Ok(stored.into())
}

/// Replaces the caller's settings for one trade.
pub fn save_trade_settings<R>(
    repo: &R,
    profile_id: ProfileId,
    trade: &str,
    form: PricingSettingsForm,
) -> ServiceResult<TradeSettingsView>
where
    R: PricingSettingsWriter + ?Sized,
{
    let trade = parse_trade(trade)?;
    let settings = form.into_settings(profile_id, trade)?;

    let saved = repo.save_pricing_settings(&settings).map_err(|err| {
        log::error!("Failed to save {trade} settings: {err}");
        ServiceError::from(err)
    })?;

    Ok(saved.into())
}
