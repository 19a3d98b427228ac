use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing_settings::{NewTradePricingSettings, TradePricingSettings};
use crate::domain::types::{ProfileId, TypeConstraintError};
use crate::models::{from_json_column, to_json_column};
use crate::pricing::{PricingSettings as Settings, Trade};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::pricing_settings)]
#[diesel(primary_key(profile_id, trade))]
pub struct PricingSettings {
    pub profile_id: i32,
    pub trade: String,
    pub rates: String,
    pub range_percent: f64,
    pub minimum_charge: f64,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pricing_settings)]
pub struct NewPricingSettings {
    pub profile_id: i32,
    pub trade: &'static str,
    pub rates: String,
    pub range_percent: f64,
    pub minimum_charge: f64,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PricingSettings> for TradePricingSettings {
    type Error = TypeConstraintError;

    fn try_from(row: PricingSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            profile_id: ProfileId::try_from(row.profile_id)?,
            trade: row
                .trade
                .parse::<Trade>()
                .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?,
            settings: Settings {
                rates: from_json_column("rates", &row.rates)?,
                range_percent: row.range_percent,
                minimum_charge: row.minimum_charge,
            },
            updated_at: Some(row.updated_at),
        })
    }
}

impl NewPricingSettings {
    pub fn new(settings: &NewTradePricingSettings, updated_at: NaiveDateTime) -> Self {
        Self {
            profile_id: settings.profile_id.get(),
            trade: settings.trade.as_str(),
            rates: to_json_column(&settings.settings.rates),
            range_percent: settings.settings.range_percent,
            minimum_charge: settings.settings.minimum_charge,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn rates_round_trip_through_json_column() {
        let now = Utc::now().naive_utc();
        let new = NewTradePricingSettings {
            profile_id: ProfileId::new(4).unwrap(),
            trade: Trade::Painting,
            settings: Settings {
                rates: [("paint_wall".to_string(), 1.4)].into_iter().collect(),
                range_percent: 15.0,
                minimum_charge: 250.0,
            },
        };
        let row = NewPricingSettings::new(&new, now);
        assert_eq!(row.trade, "painting");

        let stored = PricingSettings {
            profile_id: row.profile_id,
            trade: row.trade.to_string(),
            rates: row.rates,
            range_percent: row.range_percent,
            minimum_charge: row.minimum_charge,
            updated_at: now,
        };
        let domain = TradePricingSettings::try_from(stored).expect("valid settings");
        assert_eq!(domain.settings, new.settings);
        assert_eq!(domain.updated_at, Some(now));
    }
}
