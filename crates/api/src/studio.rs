//! Studio-wide context derived from the settings row.
//!
//! Handlers that reason about "today" or named periods load a
//! [`StudioContext`] so every date is computed in the studio's timezone with
//! its configured week start.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use studio_core::period::{self, PeriodKind, ResolvedPeriod, WeekStart};
use studio_db::models::settings::SystemSettings;
use studio_db::repositories::SettingsRepo;
use studio_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::query::PeriodParams;

/// Period used when a request does not name one.
pub const DEFAULT_PERIOD: PeriodKind = PeriodKind::Month;

#[derive(Debug, Clone)]
pub struct StudioContext {
    pub settings: SystemSettings,
    pub timezone: Tz,
    pub week_start: WeekStart,
    /// The current calendar date in the studio's timezone.
    pub today: NaiveDate,
}

impl StudioContext {
    pub async fn load(pool: &DbPool) -> AppResult<Self> {
        let settings = SettingsRepo::get(pool).await?;
        let timezone = period::parse_timezone(&settings.timezone).map_err(AppError::InternalError)?;
        let week_start = WeekStart::parse(&settings.week_start).map_err(AppError::InternalError)?;
        let today = period::local_today(Utc::now(), timezone);
        Ok(Self {
            settings,
            timezone,
            week_start,
            today,
        })
    }

    /// Resolve `?period=&start=&end=` against today.
    pub fn resolve(&self, params: &PeriodParams) -> AppResult<ResolvedPeriod> {
        period::resolve(
            params.period.unwrap_or(DEFAULT_PERIOD),
            self.today,
            self.week_start,
            params.start,
            params.end,
        )
        .map_err(AppError::validation)
    }

    /// `YYYY-MM` for the current month.
    pub fn current_month(&self) -> String {
        period::month_key(self.today)
    }
}
