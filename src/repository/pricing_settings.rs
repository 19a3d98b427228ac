use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::pricing_settings::{NewTradePricingSettings, TradePricingSettings};
use crate::domain::types::ProfileId;
use crate::models::pricing_settings::{
    NewPricingSettings as DbNewPricingSettings, PricingSettings as DbPricingSettings,
};
use crate::pricing::Trade;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, PricingSettingsReader, PricingSettingsWriter};

impl PricingSettingsReader for DieselRepository {
    fn get_pricing_settings(
        &self,
        profile_id: ProfileId,
        trade: Trade,
    ) -> RepositoryResult<Option<TradePricingSettings>> {
        use crate::schema::pricing_settings;

        let mut conn = self.conn()?;
        let row = pricing_settings::table
            .find((profile_id.get(), trade.as_str()))
            .first::<DbPricingSettings>(&mut conn)
            .optional()?;

        Ok(row.map(TradePricingSettings::try_from).transpose()?)
    }
}

impl PricingSettingsWriter for DieselRepository {
    fn save_pricing_settings(
        &self,
        settings: &NewTradePricingSettings,
    ) -> RepositoryResult<TradePricingSettings> {
        use crate::schema::pricing_settings;

        let mut conn = self.conn()?;
        let row = DbNewPricingSettings::new(settings, Utc::now().naive_utc());

        let saved = diesel::insert_into(pricing_settings::table)
            .values(&row)
            .on_conflict((pricing_settings::profile_id, pricing_settings::trade))
            .do_update()
            .set((
                pricing_settings::rates.eq(excluded(pricing_settings::rates)),
                pricing_settings::range_percent.eq(excluded(pricing_settings::range_percent)),
                pricing_settings::minimum_charge.eq(excluded(pricing_settings::minimum_charge)),
                pricing_settings::updated_at.eq(excluded(pricing_settings::updated_at)),
            ))
            .get_result::<DbPricingSettings>(&mut conn)?;

        Ok(TradePricingSettings::try_from(saved)?)
    }
}
